//! Supported network definitions

/// Chain identifier
pub type ChainId = u64;

/// Network configuration
#[derive(Debug, Clone)]
pub struct Network {
    /// Chain identifier
    pub chain_id: ChainId,
    /// Human-readable name
    pub name: &'static str,
    /// Default indexing-service endpoint
    pub subgraph_url: &'static str,
}

impl Network {
    /// Get mainnet parameters
    pub const fn mainnet() -> Self {
        Self {
            chain_id: 42220,
            name: "mainnet",
            subgraph_url: "https://api.thegraph.com/subgraphs/name/celo-name-service/cns-celo",
        }
    }

    /// Get testnet parameters
    pub const fn testnet() -> Self {
        Self {
            chain_id: 5,
            name: "goerli",
            subgraph_url: "https://api.thegraph.com/subgraphs/name/celo-name-service/cns-goerli",
        }
    }

    /// Get network by chain id
    pub const fn from_chain_id(chain_id: ChainId) -> Option<Self> {
        match chain_id {
            42220 => Some(Self::mainnet()),
            5 => Some(Self::testnet()),
            _ => None,
        }
    }
}
