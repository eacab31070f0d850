//! Error types for resolver operations

use cns_subgraph::GraphFault;

/// Result type for resolver operations.
///
/// The second parameter is the typed partial payload carried by the
/// [`Error::Subgraph`] variant. Reads that never touch the index leave
/// it at the unit default.
pub type Result<T, P = ()> = std::result::Result<T, Error<P>>;

/// Errors surfaced by resolver reads.
#[derive(Debug, thiserror::Error)]
pub enum Error<P = ()> {
    /// Contract address lookup failed for the active network
    #[error(transparent)]
    Contract(#[from] cns_params::Error),

    /// The supplied name is not resolvable
    #[error(transparent)]
    Name(#[from] cns_core::Error),

    /// An on-chain view call failed
    #[error("Contract call failed: {0}")]
    Call(String),

    /// A call returned a value with an unexpected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// The request is not meaningful for the supplied name
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// The index faulted after on-chain reads completed
    #[error("Subgraph returned {} fault(s)", .faults.len())]
    Subgraph {
        /// Data assembled before the fault was observed
        partial: P,
        /// Fault records reported by the index
        faults: Vec<GraphFault>,
    },
}

impl Error {
    /// Recasts a partial-free error for a read that carries typed partials.
    pub fn with_partial_type<P: Default>(self) -> Error<P> {
        match self {
            Error::Contract(e) => Error::Contract(e),
            Error::Name(e) => Error::Name(e),
            Error::Call(msg) => Error::Call(msg),
            Error::Decode(msg) => Error::Decode(msg),
            Error::NotSupported(msg) => Error::NotSupported(msg),
            Error::Subgraph { faults, .. } => Error::Subgraph {
                partial: P::default(),
                faults,
            },
        }
    }
}
