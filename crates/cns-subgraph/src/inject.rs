//! Debug fault and latency injection
//!
//! The injection profile is plain instance configuration on the client,
//! so concurrent clients and test runs cannot interfere with each other.

use crate::error::GraphFault;
use std::time::Duration;

/// Fixed artificial delay applied in latency mode
pub const DEBUG_LATENCY: Duration = Duration::from_secs(10);

/// Message attached to injected faults
pub const INJECTED_FAULT_MESSAGE: &str = "cns-debug";

/// Debug injection profile for a subgraph client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaultInjection {
    /// No injection; requests pass through
    #[default]
    None,
    /// Delay every request by [`DEBUG_LATENCY`] before sending
    Latency,
    /// Fail every request before any I/O happens
    Fault,
    /// Fail requests but let health queries pass, simulating an index
    /// that is reachable while reporting indexing errors
    IndexingFault,
}

impl FaultInjection {
    /// Delay to apply before a request, if any
    pub fn latency(&self) -> Option<Duration> {
        matches!(self, FaultInjection::Latency).then_some(DEBUG_LATENCY)
    }

    /// Fault to raise for a query document, if any
    ///
    /// Health (`_meta`) documents pass through in indexing-fault mode.
    pub fn fault_for(&self, document: &str) -> Option<GraphFault> {
        match self {
            FaultInjection::Fault => Some(GraphFault::new(INJECTED_FAULT_MESSAGE)),
            FaultInjection::IndexingFault if !is_meta_document(document) => {
                Some(GraphFault::new(INJECTED_FAULT_MESSAGE))
            }
            _ => None,
        }
    }
}

/// Whether a query document targets the `_meta` health object
pub fn is_meta_document(document: &str) -> bool {
    document.contains("_meta")
}
