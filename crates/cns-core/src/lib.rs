//! CELO Name Service core types
//!
//! This crate implements the domain model shared by the resolver stack:
//! validated dotted names, the canonical namehash routine, and account
//! addresses with a uniform text encoding.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod address;
pub mod error;
pub mod hash;
pub mod name;

pub use address::Address;
pub use error::{Error, Result};
pub use hash::{labelhash, namehash, LabelHash, NameHash};
pub use name::{normalise, Name, ROOT_TLD};
