//! Security Token Service records.

use super::{decode_nested, FromWire};
use crate::credentials::Credentials;
use crate::error::DecodeError;
use crate::wire::WireMap;
use serde::{Deserialize, Serialize};

/// Identity of the caller's credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallerIdentity {
    /// Account ID.
    pub account: String,
    /// Unique identifier of the calling entity.
    pub user_id: String,
    /// ARN of the calling entity.
    pub arn: String,
}

/// The assumed-role principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssumedRoleUser {
    /// `<role id>:<session name>`.
    pub assumed_role_id: String,
    /// ARN of the assumed-role session.
    pub arn: String,
}

serde_from_wire!(CallerIdentity, AssumedRoleUser);

/// Session name used when the caller does not choose one.
pub const DEFAULT_ROLE_SESSION_NAME: &str = "facade-session";

/// Input of a role assumption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssumeRoleInput {
    /// Role ARN.
    pub role_arn: String,
    /// Name of the assumed-role session.
    pub role_session_name: String,
    /// Requested lifetime; the service default applies when absent.
    pub duration_seconds: Option<u32>,
}

impl AssumeRoleInput {
    /// Assume `role_arn` under the default session name.
    pub fn new(role_arn: impl Into<String>) -> Self {
        Self {
            role_arn: role_arn.into(),
            role_session_name: DEFAULT_ROLE_SESSION_NAME.to_string(),
            duration_seconds: None,
        }
    }

    pub(crate) fn to_params(&self) -> WireMap {
        crate::wire::params([
            ("RoleArn", Some(self.role_arn.clone().into())),
            ("RoleSessionName", Some(self.role_session_name.clone().into())),
            ("DurationSeconds", self.duration_seconds.map(Into::into)),
        ])
    }
}

/// Result of a role assumption.
#[derive(Debug, Clone)]
pub struct AssumeRoleOutput {
    /// Temporary credentials, exactly as issued.
    pub credentials: Credentials,
    /// The assumed-role principal.
    pub assumed_role_user: AssumedRoleUser,
}

impl FromWire for AssumeRoleOutput {
    fn from_wire(map: &WireMap) -> Result<Self, DecodeError> {
        let credentials = crate::wire::optional_map(map, "Credentials")?
            .ok_or_else(|| DecodeError::missing("Credentials"))?;

        Ok(Self {
            credentials: Credentials::from_wire(&credentials)?,
            assumed_role_user: decode_nested(map, "AssumedRoleUser")?,
        })
    }
}
