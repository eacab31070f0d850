//! Registration expiry
//!
//! Reads the moment a registration's life ends, from the wrapper when it
//! has custody of the name and from the registrar otherwise. Subnames
//! without wrapper custody carry no expiry of their own.

use chrono::{DateTime, Duration, Utc};
use cns_core::Name;
use cns_params::{contract_address, grace_period, ChainId, ContractName};

use crate::batch::SlotOutcome;
use crate::gateway::{functions, CallArg, ContractGateway};
use crate::owner::wrapper_expiry;
use crate::{Error, Result};

/// Source contract for an expiry read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryContract {
    /// Fixed-term registrar
    Registrar,
    /// Wrapper
    NameWrapper,
}

/// Expiry state of a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryRecord {
    /// Moment the registration's life ends
    pub expiry: DateTime<Utc>,
    /// Post-expiry grace window, registrar reads only
    pub grace_period: Option<Duration>,
}

pub(crate) async fn resolve_expiry_slot(
    gateway: &dyn ContractGateway,
    chain_id: ChainId,
    name: &str,
    contract: Option<ExpiryContract>,
) -> SlotOutcome<Option<ExpiryRecord>> {
    match resolve_expiry(gateway, chain_id, name, contract).await {
        Ok(value) => SlotOutcome::Ok(value),
        Err(err) => SlotOutcome::Fatal(err),
    }
}

async fn resolve_expiry(
    gateway: &dyn ContractGateway,
    chain_id: ChainId,
    name: &str,
    contract: Option<ExpiryContract>,
) -> Result<Option<ExpiryRecord>> {
    let name = Name::parse(name)?;
    let node = name.node();

    let registry_owner = gateway
        .call(
            ContractName::Registry,
            functions::OWNER,
            &[CallArg::Node(node)],
        )
        .await?
        .into_address_opt()?;
    let wrapper = contract_address(chain_id, ContractName::NameWrapper)?;
    let wrapped = registry_owner == Some(wrapper);

    match choose_source(&name, wrapped, contract)? {
        ExpiryContract::Registrar => {
            let label = name.label_hash().ok_or_else(|| {
                Error::NotSupported("the root name has no registration".to_string())
            })?;
            let expires = gateway
                .call(
                    ContractName::BaseRegistrar,
                    functions::NAME_EXPIRES,
                    &[CallArg::Label(label)],
                )
                .await?
                .into_uint()?;
            if expires == 0 {
                return Ok(None);
            }
            Ok(Some(ExpiryRecord {
                expiry: timestamp(expires)?,
                grace_period: Some(grace_period()),
            }))
        }
        ExpiryContract::NameWrapper => {
            let values = gateway
                .call(
                    ContractName::NameWrapper,
                    functions::GET_DATA,
                    &[CallArg::Node(node)],
                )
                .await?
                .into_tuple()?;
            let expires = wrapper_expiry(values)?;
            if expires == 0 {
                return Ok(None);
            }
            Ok(Some(ExpiryRecord {
                expiry: timestamp(expires)?,
                grace_period: None,
            }))
        }
    }
}

/// Picks the contract to read from, honouring an explicit override.
///
/// The registrar only tracks second-level names and the wrapper only
/// answers for names it holds; violating either is a caller error.
fn choose_source(
    name: &Name,
    wrapped: bool,
    contract: Option<ExpiryContract>,
) -> Result<ExpiryContract> {
    match contract {
        Some(ExpiryContract::Registrar) => {
            if name.is_second_level() {
                Ok(ExpiryContract::Registrar)
            } else {
                Err(Error::NotSupported(format!(
                    "{name} has no registrar registration"
                )))
            }
        }
        Some(ExpiryContract::NameWrapper) => {
            if wrapped {
                Ok(ExpiryContract::NameWrapper)
            } else {
                Err(Error::NotSupported(format!(
                    "{name} is not held by the wrapper"
                )))
            }
        }
        None => {
            if wrapped {
                Ok(ExpiryContract::NameWrapper)
            } else if name.is_second_level() {
                Ok(ExpiryContract::Registrar)
            } else {
                Err(Error::NotSupported(format!(
                    "{name} carries no expiry of its own"
                )))
            }
        }
    }
}

fn timestamp(secs: u64) -> Result<DateTime<Utc>> {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| Error::Decode(format!("expiry {secs} out of range")))
}
