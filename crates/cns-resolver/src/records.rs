//! Resolver record reads
//!
//! Availability, text, address, and reverse-name lookups. These are pure
//! on-chain reads; none of them consult the index.

use cns_core::{namehash, Address, Name, NameHash};
use cns_params::ContractName;
use serde::Serialize;
use tracing::warn;

use crate::batch::SlotOutcome;
use crate::gateway::{functions, CallArg, ContractGateway};
use crate::{Error, Result};

/// Parent under which every reverse node lives.
const REVERSE_SUFFIX: &str = "addr.reverse";

/// Reverse-resolution result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReverseRecord {
    /// Primary name claimed by the address
    pub name: String,
    /// Whether the name forward-resolves back to the address
    #[serde(rename = "match")]
    pub matched: bool,
}

pub(crate) async fn resolve_available_slot(
    gateway: &dyn ContractGateway,
    name: &str,
) -> SlotOutcome<bool> {
    match resolve_available(gateway, name).await {
        Ok(value) => SlotOutcome::Ok(value),
        Err(err) => SlotOutcome::Fatal(err),
    }
}

async fn resolve_available(gateway: &dyn ContractGateway, name: &str) -> Result<bool> {
    let name = Name::parse(name)?;
    let label = match name.label_hash() {
        Some(label) if name.is_second_level() => label,
        _ => {
            return Err(Error::NotSupported(format!(
                "availability only applies to second-level names, got {name}"
            )))
        }
    };

    gateway
        .call(
            ContractName::BaseRegistrar,
            functions::AVAILABLE,
            &[CallArg::Label(label)],
        )
        .await?
        .into_bool()
}

pub(crate) async fn resolve_text_slot(
    gateway: &dyn ContractGateway,
    name: &str,
    key: &str,
) -> SlotOutcome<Option<String>> {
    match resolve_text(gateway, name, key).await {
        Ok(value) => SlotOutcome::Ok(value),
        Err(err) => SlotOutcome::Fatal(err),
    }
}

async fn resolve_text(
    gateway: &dyn ContractGateway,
    name: &str,
    key: &str,
) -> Result<Option<String>> {
    let name = Name::parse(name)?;
    let value = gateway
        .call(
            ContractName::PublicResolver,
            functions::TEXT,
            &[CallArg::Node(name.node()), CallArg::Str(key.to_string())],
        )
        .await?
        .into_str_opt()?;
    Ok(value.filter(|value| !value.is_empty()))
}

pub(crate) async fn resolve_addr_slot(
    gateway: &dyn ContractGateway,
    name: &str,
) -> SlotOutcome<Option<Address>> {
    match resolve_addr(gateway, name).await {
        Ok(value) => SlotOutcome::Ok(value),
        Err(err) => SlotOutcome::Fatal(err),
    }
}

async fn resolve_addr(gateway: &dyn ContractGateway, name: &str) -> Result<Option<Address>> {
    let name = Name::parse(name)?;
    let address = gateway
        .call(
            ContractName::PublicResolver,
            functions::ADDR,
            &[CallArg::Node(name.node())],
        )
        .await?
        .into_address_opt()?;
    Ok(address.filter(|address| !address.is_zero()))
}

pub(crate) async fn resolve_name_slot(
    gateway: &dyn ContractGateway,
    address: Address,
) -> SlotOutcome<Option<ReverseRecord>> {
    match resolve_name(gateway, address).await {
        Ok(value) => SlotOutcome::Ok(value),
        Err(err) => SlotOutcome::Fatal(err),
    }
}

async fn resolve_name(
    gateway: &dyn ContractGateway,
    address: Address,
) -> Result<Option<ReverseRecord>> {
    let node = reverse_node(&address);
    let claimed = gateway
        .call(
            ContractName::PublicResolver,
            functions::NAME,
            &[CallArg::Node(node)],
        )
        .await?
        .into_str_opt()?
        .filter(|name| !name.is_empty());

    let name = match claimed {
        Some(name) => name,
        None => return Ok(None),
    };

    // A claimed name only counts as matched when it resolves back to the
    // address that claimed it. A failed check reads as unmatched.
    let matched = match resolve_addr(gateway, &name).await {
        Ok(forward) => forward == Some(address),
        Err(err) => {
            warn!("Forward check for {} did not complete: {}", name, err);
            false
        }
    };

    Ok(Some(ReverseRecord { name, matched }))
}

fn reverse_node(address: &Address) -> NameHash {
    namehash(&format!("{}.{}", address.to_bare_hex(), REVERSE_SUFFIX))
}
