//! Dotted-name parsing and normalisation
//!
//! Names are stored in normalised form so that hashing and comparisons
//! behave identically no matter how the caller spelled the input.

use crate::hash::{labelhash, namehash, LabelHash, NameHash};
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Root top-level domain the registrar operates under
pub const ROOT_TLD: &str = "celo";

/// Normalise a raw name string
///
/// Case-folds the input and validates its label structure. The empty
/// string is valid and denotes the root.
pub fn normalise(input: &str) -> Result<String> {
    if input.is_empty() {
        return Ok(String::new());
    }

    let folded = input.to_lowercase();
    for label in folded.split('.') {
        if label.is_empty() {
            return Err(Error::InvalidName(format!(
                "empty label in '{input}'"
            )));
        }
        if label.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(Error::InvalidName(format!(
                "label '{label}' contains whitespace or control characters"
            )));
        }
    }

    Ok(folded)
}

/// A validated, normalised dotted name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    inner: String,
}

impl Name {
    /// Parse and normalise a raw name string
    pub fn parse(input: &str) -> Result<Self> {
        Ok(Self {
            inner: normalise(input)?,
        })
    }

    /// The normalised name string
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Whether this is the root name (empty label sequence)
    pub fn is_root(&self) -> bool {
        self.inner.is_empty()
    }

    /// Labels in left-to-right order
    pub fn labels(&self) -> Vec<&str> {
        if self.inner.is_empty() {
            Vec::new()
        } else {
            self.inner.split('.').collect()
        }
    }

    /// Number of labels
    pub fn label_count(&self) -> usize {
        self.labels().len()
    }

    /// The leftmost label, if any
    pub fn first_label(&self) -> Option<&str> {
        self.labels().first().copied()
    }

    /// The parent name (everything after the first label)
    ///
    /// A single-label name's parent is the root; the root has no parent.
    pub fn parent(&self) -> Option<Name> {
        if self.inner.is_empty() {
            return None;
        }
        match self.inner.split_once('.') {
            Some((_, rest)) => Some(Name {
                inner: rest.to_string(),
            }),
            None => Some(Name {
                inner: String::new(),
            }),
        }
    }

    /// Whether this name is registered directly under the root TLD
    ///
    /// Only these names can carry a registrar-tier registration.
    pub fn is_second_level(&self) -> bool {
        let labels = self.labels();
        labels.len() == 2 && labels[1] == ROOT_TLD
    }

    /// Canonical 32-byte node identifier for this name
    pub fn node(&self) -> NameHash {
        namehash(&self.inner)
    }

    /// Hash of the leftmost label (the registrar token id)
    pub fn label_hash(&self) -> Option<LabelHash> {
        self.first_label().map(labelhash)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl FromStr for Name {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Name::parse(s)
    }
}
