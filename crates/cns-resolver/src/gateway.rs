//! Contract gateway seam
//!
//! All on-chain reads go through [`ContractGateway`]. Implementations own
//! transport and ABI concerns; the resolver only sees decoded values, so
//! tests and alternative backends plug in behind the same trait.

use async_trait::async_trait;
use cns_core::{Address, LabelHash, NameHash};
use cns_params::ContractName;

use crate::{Error, Result};

/// View-function names invoked by the resolver.
pub mod functions {
    /// Registry: controller of a node
    pub const OWNER: &str = "owner";
    /// Registrar and wrapper: holder of a token or node
    pub const OWNER_OF: &str = "ownerOf";
    /// Wrapper: packed (owner, fuses, expiry) record for a node
    pub const GET_DATA: &str = "getData";
    /// Registrar: expiry timestamp of a registration
    pub const NAME_EXPIRES: &str = "nameExpires";
    /// Registrar: whether a label is open for registration
    pub const AVAILABLE: &str = "available";
    /// Resolver: text record for a node and key
    pub const TEXT: &str = "text";
    /// Resolver: address record for a node
    pub const ADDR: &str = "addr";
    /// Resolver: primary name for a reverse node
    pub const NAME: &str = "name";
}

/// Argument passed to a contract view function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArg {
    /// Canonical node identifier
    Node(NameHash),
    /// Label hash, used as the registrar token id
    Label(LabelHash),
    /// Account address
    Address(Address),
    /// String value
    Str(String),
}

/// Decoded result of a contract view call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallValue {
    /// An account address
    Address(Address),
    /// An unsigned integer
    Uint(u64),
    /// A boolean
    Bool(bool),
    /// A string
    Str(String),
    /// Multiple decoded values in declaration order
    Tuple(Vec<CallValue>),
    /// Decoded absence, e.g. a query on a nonexistent token
    Null,
}

impl CallValue {
    /// Interprets the value as an address, mapping decoded absence to `None`.
    pub fn into_address_opt(self) -> Result<Option<Address>> {
        match self {
            CallValue::Address(addr) => Ok(Some(addr)),
            CallValue::Null => Ok(None),
            other => Err(Error::Decode(format!("expected address, got {other:?}"))),
        }
    }

    /// Interprets the value as an unsigned integer.
    pub fn into_uint(self) -> Result<u64> {
        match self {
            CallValue::Uint(value) => Ok(value),
            other => Err(Error::Decode(format!("expected uint, got {other:?}"))),
        }
    }

    /// Interprets the value as a boolean.
    pub fn into_bool(self) -> Result<bool> {
        match self {
            CallValue::Bool(value) => Ok(value),
            other => Err(Error::Decode(format!("expected bool, got {other:?}"))),
        }
    }

    /// Interprets the value as a string, mapping decoded absence to `None`.
    pub fn into_str_opt(self) -> Result<Option<String>> {
        match self {
            CallValue::Str(value) => Ok(Some(value)),
            CallValue::Null => Ok(None),
            other => Err(Error::Decode(format!("expected string, got {other:?}"))),
        }
    }

    /// Interprets the value as a tuple of decoded values.
    pub fn into_tuple(self) -> Result<Vec<CallValue>> {
        match self {
            CallValue::Tuple(values) => Ok(values),
            other => Err(Error::Decode(format!("expected tuple, got {other:?}"))),
        }
    }
}

/// Gateway to on-chain view functions.
///
/// Implementations resolve contract addresses through `cns-params` for the
/// active network and surface transport failures as [`Error::Call`].
#[async_trait]
pub trait ContractGateway: Send + Sync {
    /// Invokes `function` on `contract` with the supplied arguments.
    async fn call(
        &self,
        contract: ContractName,
        function: &str,
        args: &[CallArg],
    ) -> Result<CallValue>;
}
