//! Name history
//!
//! Reads the recorded event stream of a name from the index. Nothing here
//! touches the chain, so a faulted index degrades the read with no
//! partial data to keep.

use std::collections::HashMap;

use cns_core::Name;
use cns_subgraph::IndexReader;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::batch::SlotOutcome;

const SECOND_LEVEL_HISTORY_QUERY: &str = "query getHistory($id: String!) { domain(id: $id) { events { id blockNumber transactionID type: __typename } resolver { events { id blockNumber transactionID type: __typename } } registration { events { id blockNumber transactionID type: __typename } } } }";

const SUBNAME_HISTORY_QUERY: &str = "query getHistory($id: String!) { domain(id: $id) { events { id blockNumber transactionID type: __typename } resolver { events { id blockNumber transactionID type: __typename } } } }";

/// One recorded event in a name's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEvent {
    /// Index-assigned event id
    pub id: String,
    /// Block the event landed in
    pub block_number: u64,
    /// Transaction carrying the event
    #[serde(rename = "transactionID")]
    pub transaction_id: String,
    /// Event type discriminator
    #[serde(rename = "type")]
    pub kind: String,
    /// Event-specific payload
    #[serde(flatten)]
    pub payload: HashMap<String, serde_json::Value>,
}

/// Recorded history of a name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameHistory {
    /// Registry-level events for the name
    pub domain: Vec<HistoryEvent>,
    /// Events on the name's resolver
    pub resolver: Vec<HistoryEvent>,
    /// Registrar registration events, second-level names only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration: Option<Vec<HistoryEvent>>,
}

pub(crate) async fn resolve_history_slot(
    index: &dyn IndexReader,
    name: &str,
) -> SlotOutcome<Option<NameHistory>> {
    let name = match Name::parse(name) {
        Ok(name) => name,
        Err(err) => return SlotOutcome::Fatal(err.into()),
    };

    match fetch_history(index, &name).await {
        Ok(history) => SlotOutcome::Ok(history),
        Err(err) => SlotOutcome::Degraded {
            partial: None,
            faults: err.faults(),
        },
    }
}

async fn fetch_history(
    index: &dyn IndexReader,
    name: &Name,
) -> cns_subgraph::Result<Option<NameHistory>> {
    #[derive(Deserialize)]
    struct EventList {
        #[serde(default)]
        events: Vec<HistoryEvent>,
    }
    #[derive(Deserialize)]
    struct DomainData {
        #[serde(default)]
        events: Vec<HistoryEvent>,
        resolver: Option<EventList>,
        registration: Option<EventList>,
    }
    #[derive(Deserialize)]
    struct Data {
        domain: Option<DomainData>,
    }

    let second_level = name.is_second_level();
    let document = if second_level {
        SECOND_LEVEL_HISTORY_QUERY
    } else {
        SUBNAME_HISTORY_QUERY
    };
    let value = index
        .query_raw(document, json!({ "id": name.node().to_string() }))
        .await?;
    let data: Data = serde_json::from_value(value)
        .map_err(|err| cns_subgraph::Error::Decode(err.to_string()))?;

    let domain = match data.domain {
        Some(domain) => domain,
        None => {
            debug!("{} has no recorded history", name);
            return Ok(None);
        }
    };

    let registration =
        second_level.then(|| domain.registration.map(|list| list.events).unwrap_or_default());

    Ok(Some(NameHistory {
        domain: domain.events,
        resolver: domain.resolver.map(|list| list.events).unwrap_or_default(),
        registration,
    }))
}
