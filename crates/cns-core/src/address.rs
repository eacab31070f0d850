//! Account addresses
//!
//! On-chain calls and the indexing service disagree on address casing
//! (checksummed vs lowercase). The `Address` type folds everything to
//! lowercase hex at the boundary so comparisons and output are uniform.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 20-byte account address
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 20]);

impl Address {
    /// The zero address, marking burned or absent ownership slots
    pub const ZERO: Address = Address([0u8; 20]);

    /// Construct from raw bytes
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Parse from a hex string, with or without a `0x` prefix
    ///
    /// Accepts any casing; the stored form is canonical.
    pub fn parse(input: &str) -> Result<Self> {
        let stripped = input.strip_prefix("0x").unwrap_or(input);
        let bytes =
            hex::decode(stripped).map_err(|e| Error::InvalidAddress(e.to_string()))?;
        let array: [u8; 20] = bytes
            .try_into()
            .map_err(|_| Error::InvalidAddress(format!("expected 20 bytes in '{input}'")))?;
        Ok(Self(array))
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Whether this is the zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Lowercase hex encoding without the `0x` prefix
    pub fn to_bare_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
