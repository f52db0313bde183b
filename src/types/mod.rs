//! Typed records returned by the service facades.
//!
//! Every record is a plain immutable value read from a provider response map
//! through [`FromWire`]. Most records are serde-derived with the provider's
//! member names; the few that need more than renaming override
//! [`FromWire::from_wire`].

use crate::error::DecodeError;
use crate::wire::{self, WireMap};
use serde::{Deserialize, Serialize};

/// Construction of a record from a response map.
pub trait FromWire: Sized {
    /// Read the record from `map`.
    fn from_wire(map: &WireMap) -> Result<Self, DecodeError>;
}

/// Implement [`FromWire`] through the record's serde derive.
macro_rules! serde_from_wire {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::types::FromWire for $ty {
                fn from_wire(map: &$crate::wire::WireMap) -> Result<Self, $crate::error::DecodeError> {
                    $crate::wire::decode(map)
                }
            }
        )+
    };
}

pub mod cloudformation;
pub mod cloudwatch;
pub mod dynamodb;
pub mod ec2;
pub mod iam;
pub mod identitystore;
pub mod logs;
pub mod organizations;
pub mod s3;
pub mod scheduler;
pub mod servicecatalog;
pub mod ses;
pub mod sqs;
pub mod ssm;
pub mod sso_admin;
pub mod sts;

/// A key/value resource tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    /// Tag key.
    pub key: String,
    /// Tag value.
    pub value: String,
}

impl Tag {
    /// Create a tag.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

serde_from_wire!(Tag);

/// Decode every entry under `field` with `T::from_wire`; an absent list is empty.
pub(crate) fn decode_list<T: FromWire>(map: &WireMap, field: &str) -> Result<Vec<T>, DecodeError> {
    wire::list(map, field)?
        .iter()
        .map(|entry| wire::as_map(entry, field).and_then(T::from_wire))
        .collect()
}

/// Decode the object under `field` with `T::from_wire`.
pub(crate) fn decode_nested<T: FromWire>(map: &WireMap, field: &str) -> Result<T, DecodeError> {
    let inner = wire::optional_map(map, field)?.ok_or_else(|| DecodeError::missing(field))?;
    T::from_wire(&inner)
}
