//! SSM Parameter Store records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parameter.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter value (decrypted when requested).
    pub value: String,
    /// Parameter type.
    #[serde(default, rename = "Type")]
    pub parameter_type: Option<ParameterType>,
    /// Version.
    #[serde(default)]
    pub version: Option<u64>,
    /// Last modification time.
    #[serde(default, deserialize_with = "crate::wire::timestamp::optional")]
    pub last_modified_date: Option<DateTime<Utc>>,
}

impl Parameter {
    /// Create a parameter to store.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            parameter_type: None,
            version: None,
            last_modified_date: None,
        }
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value: &dyn fmt::Debug = match self.parameter_type {
            Some(ParameterType::SecureString) => &"[REDACTED]",
            _ => &self.value,
        };
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("value", value)
            .field("parameter_type", &self.parameter_type)
            .field("version", &self.version)
            .field("last_modified_date", &self.last_modified_date)
            .finish()
    }
}

serde_from_wire!(Parameter);

/// Parameter type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterType {
    /// Plain string.
    String,
    /// Comma-separated list.
    StringList,
    /// Encrypted string.
    #[default]
    SecureString,
}

impl ParameterType {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::String => "String",
            ParameterType::StringList => "StringList",
            ParameterType::SecureString => "SecureString",
        }
    }
}
