//! CELO Name Service network parameters and constants
//!
//! This crate provides the supported networks, the deployed contract
//! address table, and registrar lifecycle constants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod contracts;
pub mod network;

pub use contracts::{contract_address, ContractName};
pub use network::{ChainId, Network};

/// Post-expiry grace period for registrar-held names, in milliseconds (90 days)
pub const GRACE_PERIOD_MS: u64 = 7_776_000_000;

/// Post-expiry grace period as a duration
pub fn grace_period() -> chrono::Duration {
    chrono::Duration::milliseconds(GRACE_PERIOD_MS as i64)
}

/// Error types for parameter operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// No deployment recorded for a contract on the active network
    #[error("No address for contract {contract} on network {network}")]
    MissingContract {
        /// The contract that was looked up
        contract: ContractName,
        /// The network the lookup ran against
        network: ChainId,
    },

    /// Malformed entry in the deployment table
    #[error("Invalid contract address: {0}")]
    Address(#[from] cns_core::Error),
}

/// Result type for parameter operations
pub type Result<T> = std::result::Result<T, Error>;
