//! Error types for CNS core

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// CNS core errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Invalid name format
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Invalid address format
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid hash encoding
    #[error("Invalid hash: {0}")]
    InvalidHash(String),
}
