//! Error types

use serde::{Deserialize, Serialize};

/// One segment of a fault path: a field name, or an index into a list
/// field such as a history `events` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Named response field
    Field(String),
    /// Position within a list field
    Index(u64),
}

/// A single fault record reported by the indexing service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphFault {
    /// Human-readable fault message
    pub message: String,
    /// Response path the fault applies to, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
}

impl GraphFault {
    /// Construct a fault with a message only
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
        }
    }

    /// Fallback fault used when the backend gave no structured errors
    pub fn unknown() -> Self {
        Self::new("unknown_error")
    }
}

/// Subgraph errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Transport-level failure reaching the endpoint
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("HTTP status {0}")]
    Status(u16),

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// The service answered with query-level faults
    #[error("Subgraph returned {} fault(s)", .0.len())]
    Graph(Vec<GraphFault>),

    /// Fault injected by the debug profile
    #[error("Injected subgraph fault")]
    Injected(Vec<GraphFault>),
}

impl Error {
    /// Underlying fault records, normalised
    ///
    /// Untyped failures collapse to the `unknown_error` fallback so
    /// callers always have at least one record to report.
    pub fn faults(&self) -> Vec<GraphFault> {
        match self {
            Error::Graph(faults) | Error::Injected(faults) if !faults.is_empty() => {
                faults.clone()
            }
            _ => vec![GraphFault::unknown()],
        }
    }
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
