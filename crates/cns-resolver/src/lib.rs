//! CELO Name Service ownership resolution and batched reads
//!
//! This crate answers who currently owns a name and when that claim
//! lapses. Three authorities can hold a name: the registry, the
//! fixed-term registrar, and the wrapper; [`CnsClient`] probes them in
//! priority order and corroborates second-level names against the
//! indexing service. Reads can also be prepared as slots and settled
//! together as a batch, where one slot failing never discards what the
//! other slots found.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod batch;
pub mod client;
pub mod error;
pub mod expiry;
pub mod gateway;
pub mod history;
pub mod owner;
pub mod records;

pub use batch::{BatchError, BatchRequest, BatchSet};
pub use client::CnsClient;
pub use error::{Error, Result};
pub use expiry::{ExpiryContract, ExpiryRecord};
pub use gateway::{CallArg, CallValue, ContractGateway};
pub use history::{HistoryEvent, NameHistory};
pub use owner::{OwnerOptions, OwnerRecord, OwnershipLevel};
pub use records::ReverseRecord;
