//! Deployed contract address table
//!
//! Both supported networks share one deployment set. Multicall is the
//! exception: it is a canonical singleton valid on any network.

use crate::{ChainId, Error, Result};
use cns_core::Address;
use std::fmt;

/// Logical names of the deployed contracts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractName {
    /// Base name registry
    Registry,
    /// Fixed-term registrar for second-level names
    BaseRegistrar,
    /// Registration controller
    RegistrarController,
    /// DNSSEC-based registrar
    DnsRegistrar,
    /// Wrapping layer
    NameWrapper,
    /// Standard record resolver
    PublicResolver,
    /// Reverse-resolution registrar
    ReverseRegistrar,
    /// Wildcard-aware resolution helper
    UniversalResolver,
    /// Bulk renewal helper
    BulkRenewal,
    /// Call batching helper
    Multicall,
}

impl fmt::Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Deployment artifact names, as they appear in error messages.
        let name = match self {
            ContractName::Registry => "ENSRegistry",
            ContractName::BaseRegistrar => "BaseRegistrarImplementation",
            ContractName::RegistrarController => "ETHRegistrarController",
            ContractName::DnsRegistrar => "DNSRegistrar",
            ContractName::NameWrapper => "NameWrapper",
            ContractName::PublicResolver => "PublicResolver",
            ContractName::ReverseRegistrar => "ReverseRegistrar",
            ContractName::UniversalResolver => "UniversalResolver",
            ContractName::BulkRenewal => "BulkRenewal",
            ContractName::Multicall => "Multicall",
        };
        f.write_str(name)
    }
}

const REGISTRY: &str = "0xe51eBC096cDE3198C98118e0F9AB9aBA202a9307";
const BASE_REGISTRAR: &str = "0x17AB01831d27602A3431D6f87e1A222354C84F32";
const REGISTRAR_CONTROLLER: &str = "0xB0C57d3843A6Dd4f58A0C266A52E03566129C51d";
const DNS_REGISTRAR: &str = "0x10DBe44ADf4c04D56333A80994b3F2D1eFb0bfF2";
const NAME_WRAPPER: &str = "0x8D028006Ac841862C3f0FDA4C67c995C5133ECD6";
const PUBLIC_RESOLVER: &str = "0x537c7D15CD24855D092927b3Faf326897d5645A4";
const REVERSE_REGISTRAR: &str = "0x455aafC66e698cD91ffC88680BF191FC01f72560";
const UNIVERSAL_RESOLVER: &str = "0xC5CD56FdDECa464a7FAd4Dd7868EcfDE4C282Fde";
const BULK_RENEWAL: &str = "0xE1F9bff1f8cDdBDa6B9F9D2DFc2D83aA48cB70B2";
const MULTICALL: &str = "0xcA11bde05977b3631167028862bE2a173976CA11";

/// Whether the deployment table covers a network
pub const fn is_supported_network(chain_id: ChainId) -> bool {
    matches!(chain_id, 5 | 42220)
}

fn deployment(contract: ContractName) -> &'static str {
    match contract {
        ContractName::Registry => REGISTRY,
        ContractName::BaseRegistrar => BASE_REGISTRAR,
        ContractName::RegistrarController => REGISTRAR_CONTROLLER,
        ContractName::DnsRegistrar => DNS_REGISTRAR,
        ContractName::NameWrapper => NAME_WRAPPER,
        ContractName::PublicResolver => PUBLIC_RESOLVER,
        ContractName::ReverseRegistrar => REVERSE_REGISTRAR,
        ContractName::UniversalResolver => UNIVERSAL_RESOLVER,
        ContractName::BulkRenewal => BULK_RENEWAL,
        ContractName::Multicall => MULTICALL,
    }
}

/// Look up the deployed address of a contract on a network
///
/// Fails with [`Error::MissingContract`] when the network has no
/// recorded deployment for the contract.
pub fn contract_address(chain_id: ChainId, contract: ContractName) -> Result<Address> {
    if contract != ContractName::Multicall && !is_supported_network(chain_id) {
        return Err(Error::MissingContract {
            contract,
            network: chain_id,
        });
    }

    Ok(Address::parse(deployment(contract))?)
}
