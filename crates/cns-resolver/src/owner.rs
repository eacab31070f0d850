//! Ownership resolution
//!
//! Decides which authority currently governs a name by probing the
//! wrapper, registrar, and registry in fixed priority order. The registry
//! record is read once and shared across probes. Second-level names are
//! additionally corroborated against the index, which is the only source
//! for the registrant field.

use std::fmt;

use chrono::Utc;
use cns_core::{Address, Name, NameHash};
use cns_params::{contract_address, grace_period, ChainId, ContractName};
use cns_subgraph::IndexReader;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::batch::SlotOutcome;
use crate::gateway::{functions, CallArg, CallValue, ContractGateway};
use crate::{Error, Result};

const REGISTRATION_QUERY: &str =
    "query getRegistration($id: String!) { registration(id: $id) { registrant { id } } }";

/// Authority currently governing a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OwnershipLevel {
    /// Plain registry record
    Registry,
    /// Fixed-term registrar registration
    Registrar,
    /// Wrapper custody
    NameWrapper,
}

impl fmt::Display for OwnershipLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OwnershipLevel::Registry => "registry",
            OwnershipLevel::Registrar => "registrar",
            OwnershipLevel::NameWrapper => "nameWrapper",
        };
        f.write_str(label)
    }
}

/// Resolved ownership state of a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRecord {
    /// Owner under the authoritative tier
    pub owner: Address,
    /// Tier the owner was found at
    pub ownership_level: OwnershipLevel,
    /// Whether the registration is past its life, second-level names only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
    /// Index-sourced registrant, registrar tier only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrant: Option<Address>,
}

/// Options for an ownership read.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerOptions {
    /// Skip index corroboration and return on-chain data only
    pub skip_graph: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TierProbe {
    Wrapper,
    Registrar,
    Registry,
}

const SECOND_LEVEL_PROBES: [TierProbe; 3] =
    [TierProbe::Wrapper, TierProbe::Registrar, TierProbe::Registry];
const DEEP_NAME_PROBES: [TierProbe; 2] = [TierProbe::Wrapper, TierProbe::Registry];

pub(crate) async fn resolve_owner_slot(
    gateway: &dyn ContractGateway,
    index: &dyn IndexReader,
    chain_id: ChainId,
    name: &str,
    options: OwnerOptions,
) -> SlotOutcome<Option<OwnerRecord>> {
    let name = match Name::parse(name) {
        Ok(name) => name,
        Err(err) => return SlotOutcome::Fatal(err.into()),
    };

    let record = match resolve_on_chain(gateway, chain_id, &name).await {
        Ok(record) => record,
        Err(err) => return SlotOutcome::Fatal(err),
    };

    // Only second-level names have a registrar registration to corroborate.
    if !name.is_second_level() || options.skip_graph {
        return SlotOutcome::Ok(record);
    }

    match fetch_registrant(index, &name).await {
        Ok(registrant) => SlotOutcome::Ok(attach_registrant(record, registrant)),
        Err(err) => {
            warn!("Owner lookup for {} degraded: {}", name, err);
            SlotOutcome::Degraded {
                partial: Some(record),
                faults: err.faults(),
            }
        }
    }
}

async fn resolve_on_chain(
    gateway: &dyn ContractGateway,
    chain_id: ChainId,
    name: &Name,
) -> Result<Option<OwnerRecord>> {
    let node = name.node();
    let registry_owner = gateway
        .call(
            ContractName::Registry,
            functions::OWNER,
            &[CallArg::Node(node)],
        )
        .await?
        .into_address_opt()?
        .filter(|owner| !owner.is_zero());

    let wrapper = contract_address(chain_id, ContractName::NameWrapper)?;
    let probes: &[TierProbe] = if name.is_second_level() {
        &SECOND_LEVEL_PROBES
    } else {
        &DEEP_NAME_PROBES
    };

    for probe in probes {
        match probe {
            TierProbe::Wrapper => {
                if registry_owner == Some(wrapper) {
                    let record = wrapped_record(gateway, name, node).await?;
                    return Ok(Some(record));
                }
            }
            TierProbe::Registrar => {
                if let Some(record) = registrar_record(gateway, name, registry_owner).await? {
                    return Ok(Some(record));
                }
            }
            TierProbe::Registry => {
                if let Some(owner) = registry_owner {
                    debug!("{} held at the registry by {}", name, owner);
                    return Ok(Some(OwnerRecord {
                        owner,
                        ownership_level: OwnershipLevel::Registry,
                        expired: None,
                        registrant: None,
                    }));
                }
            }
        }
    }

    debug!("{} has no claimant at any tier", name);
    Ok(None)
}

/// Builds the record for a name held by the wrapper.
///
/// A burned or unset wrapper token resolves to the zero owner but still
/// claims the tier; expiry state is reported for second-level names only.
async fn wrapped_record(
    gateway: &dyn ContractGateway,
    name: &Name,
    node: NameHash,
) -> Result<OwnerRecord> {
    let owner = gateway
        .call(
            ContractName::NameWrapper,
            functions::OWNER_OF,
            &[CallArg::Node(node)],
        )
        .await?
        .into_address_opt()?
        .unwrap_or(Address::ZERO);

    let expired = if name.is_second_level() {
        let values = gateway
            .call(
                ContractName::NameWrapper,
                functions::GET_DATA,
                &[CallArg::Node(node)],
            )
            .await?
            .into_tuple()?;
        // Wrapper expiry has no grace window.
        Some(past_deadline(wrapper_expiry(values)?, 0))
    } else {
        None
    };

    Ok(OwnerRecord {
        owner,
        ownership_level: OwnershipLevel::NameWrapper,
        expired,
        registrant: None,
    })
}

/// Builds the record for a registrar-registered second-level name.
///
/// The registrar claims the name when its token has a holder or a
/// nonzero expiry is on record; the reported owner is the registry
/// controller either way.
async fn registrar_record(
    gateway: &dyn ContractGateway,
    name: &Name,
    registry_owner: Option<Address>,
) -> Result<Option<OwnerRecord>> {
    let label = match name.label_hash() {
        Some(label) => label,
        None => return Ok(None),
    };

    let token_owner = gateway
        .call(
            ContractName::BaseRegistrar,
            functions::OWNER_OF,
            &[CallArg::Label(label)],
        )
        .await?
        .into_address_opt()?
        .filter(|owner| !owner.is_zero());
    let expires = gateway
        .call(
            ContractName::BaseRegistrar,
            functions::NAME_EXPIRES,
            &[CallArg::Label(label)],
        )
        .await?
        .into_uint()?;

    if token_owner.is_none() && expires == 0 {
        return Ok(None);
    }

    let expired = past_deadline(expires, grace_period().num_seconds());
    Ok(Some(OwnerRecord {
        owner: registry_owner.unwrap_or(Address::ZERO),
        ownership_level: OwnershipLevel::Registrar,
        expired: Some(expired),
        registrant: None,
    }))
}

async fn fetch_registrant(
    index: &dyn IndexReader,
    name: &Name,
) -> cns_subgraph::Result<Option<Address>> {
    #[derive(Deserialize)]
    struct RegistrantRef {
        id: String,
    }
    #[derive(Deserialize)]
    struct Registration {
        registrant: Option<RegistrantRef>,
    }
    #[derive(Deserialize)]
    struct Data {
        registration: Option<Registration>,
    }

    let label = match name.label_hash() {
        Some(label) => label,
        None => return Ok(None),
    };
    let value = index
        .query_raw(REGISTRATION_QUERY, json!({ "id": label.to_string() }))
        .await?;
    let data: Data = serde_json::from_value(value)
        .map_err(|err| cns_subgraph::Error::Decode(err.to_string()))?;

    Ok(data
        .registration
        .and_then(|registration| registration.registrant)
        .and_then(|registrant| match Address::parse(&registrant.id) {
            Ok(address) => Some(address),
            Err(err) => {
                warn!("Index returned malformed registrant {}: {}", registrant.id, err);
                None
            }
        }))
}

/// The registrant only applies to registrar-tier records; a missing
/// registration leaves the on-chain record untouched.
fn attach_registrant(
    record: Option<OwnerRecord>,
    registrant: Option<Address>,
) -> Option<OwnerRecord> {
    record.map(|mut record| {
        if record.ownership_level == OwnershipLevel::Registrar {
            record.registrant = registrant;
        }
        record
    })
}

// getData returns (owner, fuses, expiry).
pub(crate) fn wrapper_expiry(mut values: Vec<CallValue>) -> Result<u64> {
    if values.len() != 3 {
        return Err(Error::Decode(format!(
            "getData returned {} values",
            values.len()
        )));
    }
    match values.pop() {
        Some(value) => value.into_uint(),
        None => Err(Error::Decode("getData returned no expiry".to_string())),
    }
}

fn past_deadline(expiry_secs: u64, grace_secs: i64) -> bool {
    let deadline = i64::try_from(expiry_secs)
        .unwrap_or(i64::MAX)
        .saturating_add(grace_secs);
    deadline < Utc::now().timestamp()
}
