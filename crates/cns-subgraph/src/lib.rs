//! Graph-query client for the CNS indexing service
//!
//! Wraps the eventually-consistent subgraph endpoint with typed queries,
//! a `_meta` health probe, and debug fault/latency injection used to
//! exercise degraded-mode behavior upstream.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod inject;

pub use client::{
    IndexReader, MetaBlock, SubgraphClient, SubgraphConfig, SubgraphMeta, META_QUERY,
};
pub use error::{Error, GraphFault, PathSegment, Result};
pub use inject::{is_meta_document, FaultInjection, DEBUG_LATENCY, INJECTED_FAULT_MESSAGE};
