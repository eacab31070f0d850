//! Canonical name hashing
//!
//! Implements the namehash scheme: a name's 32-byte node identifier is
//! built label-wise from right to left, each level hashing the parent
//! node together with the Keccak-256 hash of its own label. The empty
//! name maps to the all-zero node.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

fn decode_hex32(input: &str) -> Result<[u8; 32]> {
    let stripped = input.strip_prefix("0x").unwrap_or(input);
    let bytes = hex::decode(stripped).map_err(|e| Error::InvalidHash(e.to_string()))?;
    let array: [u8; 32] = bytes
        .try_into()
        .map_err(|_| Error::InvalidHash(format!("expected 32 bytes in '{input}'")))?;
    Ok(array)
}

/// Canonical 32-byte node identifier of a full name
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NameHash([u8; 32]);

impl NameHash {
    /// The all-zero node (the root)
    pub const ZERO: NameHash = NameHash([0u8; 32]);

    /// Construct from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse from a hex string, with or without a `0x` prefix
    pub fn from_hex(input: &str) -> Result<Self> {
        Ok(Self(decode_hex32(input)?))
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for NameHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for NameHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameHash({self})")
    }
}

impl FromStr for NameHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for NameHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for NameHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Keccak-256 hash of a single label (the registrar token id)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelHash([u8; 32]);

impl LabelHash {
    /// Construct from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse from a hex string, with or without a `0x` prefix
    pub fn from_hex(input: &str) -> Result<Self> {
        Ok(Self(decode_hex32(input)?))
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for LabelHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for LabelHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LabelHash({self})")
    }
}

impl FromStr for LabelHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for LabelHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for LabelHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Hash a single label
pub fn labelhash(label: &str) -> LabelHash {
    LabelHash(keccak256(label.as_bytes()))
}

/// Compute the node identifier of a dotted name
///
/// The input is hashed as given; callers normalise first (see
/// [`crate::Name::parse`]) so that equivalent spellings agree.
pub fn namehash(name: &str) -> NameHash {
    let mut node = [0u8; 32];
    if name.is_empty() {
        return NameHash(node);
    }

    for label in name.rsplit('.') {
        let label_hash = keccak256(label.as_bytes());
        let mut level = [0u8; 64];
        level[..32].copy_from_slice(&node);
        level[32..].copy_from_slice(&label_hash);
        node = keccak256(&level);
    }

    NameHash(node)
}
