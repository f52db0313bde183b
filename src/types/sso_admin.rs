//! IAM Identity Center administration records.

use crate::wire::{self, WireMap};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of principal being assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrincipalType {
    /// A user.
    User,
    /// A group.
    Group,
}

impl PrincipalType {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalType::User => "USER",
            PrincipalType::Group => "GROUP",
        }
    }
}

/// Input of `create_account_assignment`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountAssignmentInput {
    /// Identity Center instance ARN.
    pub instance_arn: String,
    /// Permission set ARN.
    pub permission_set_arn: String,
    /// User or group ID.
    pub principal_id: String,
    /// Kind of principal.
    pub principal_type: PrincipalType,
    /// Target account ID.
    pub target_id: String,
}

impl AccountAssignmentInput {
    /// Assignments always target an account.
    pub(crate) fn to_params(&self) -> WireMap {
        wire::params([
            ("InstanceArn", Some(self.instance_arn.clone().into())),
            ("PermissionSetArn", Some(self.permission_set_arn.clone().into())),
            ("PrincipalId", Some(self.principal_id.clone().into())),
            ("PrincipalType", Some(self.principal_type.as_str().into())),
            ("TargetId", Some(self.target_id.clone().into())),
            ("TargetType", Some("AWS_ACCOUNT".into())),
        ])
    }
}

/// Status of an assignment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountAssignmentStatus {
    /// `IN_PROGRESS`, `FAILED` or `SUCCEEDED`.
    pub status: String,
    /// Request ID for polling.
    pub request_id: String,
    /// When the request was created.
    #[serde(default, deserialize_with = "crate::wire::timestamp::optional")]
    pub created_date: Option<DateTime<Utc>>,
    /// Reason, when failed.
    #[serde(default)]
    pub failure_reason: Option<String>,
}

serde_from_wire!(AccountAssignmentStatus);
