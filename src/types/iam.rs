//! IAM records.

use super::{decode_list, FromWire};
use crate::error::DecodeError;
use crate::pagination::PageMetadata;
use crate::wire::{self, WireMap};
use serde::{Deserialize, Serialize};

/// A group attached to a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyGroup {
    /// Group name.
    pub group_name: String,
    /// Group ID.
    pub group_id: String,
}

/// A user attached to a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyUser {
    /// User name.
    pub user_name: String,
    /// User ID.
    pub user_id: String,
}

/// A role attached to a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyRole {
    /// Role name.
    pub role_name: String,
    /// Role ID.
    pub role_id: String,
}

serde_from_wire!(PolicyGroup, PolicyUser, PolicyRole);

/// Every entity a managed policy is attached to.
///
/// Folded across pages by concatenating each list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyEntities {
    /// Attached groups.
    pub policy_groups: Vec<PolicyGroup>,
    /// Attached users.
    pub policy_users: Vec<PolicyUser>,
    /// Attached roles.
    pub policy_roles: Vec<PolicyRole>,
}

impl PolicyEntities {
    /// Total number of entities.
    pub fn len(&self) -> usize {
        self.policy_groups.len() + self.policy_users.len() + self.policy_roles.len()
    }

    /// True if nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromWire for PolicyEntities {
    fn from_wire(map: &WireMap) -> Result<Self, DecodeError> {
        Ok(Self {
            policy_groups: decode_list(map, "PolicyGroups")?,
            policy_users: decode_list(map, "PolicyUsers")?,
            policy_roles: decode_list(map, "PolicyRoles")?,
        })
    }
}

impl PageMetadata for PolicyEntities {
    fn absorb(&mut self, next: Self) {
        self.policy_groups.extend(next.policy_groups);
        self.policy_users.extend(next.policy_users);
        self.policy_roles.extend(next.policy_roles);
    }
}

/// Input of `list_entities_for_policy`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEntitiesForPolicyInput {
    /// Policy ARN.
    pub policy_arn: String,
    /// `User`, `Role`, `Group`, `LocalManagedPolicy` or `AWSManagedPolicy`.
    pub entity_filter: Option<String>,
    /// Path prefix filter.
    pub path_prefix: Option<String>,
    /// `PermissionsPolicy` or `PermissionsBoundary`.
    pub policy_usage_filter: Option<String>,
}

impl ListEntitiesForPolicyInput {
    /// Create an unfiltered input.
    pub fn new(policy_arn: impl Into<String>) -> Self {
        Self {
            policy_arn: policy_arn.into(),
            ..Default::default()
        }
    }

    pub(crate) fn to_params(&self) -> WireMap {
        wire::params([
            ("PolicyArn", Some(self.policy_arn.clone().into())),
            ("EntityFilter", self.entity_filter.clone().map(Into::into)),
            ("PathPrefix", self.path_prefix.clone().map(Into::into)),
            ("PolicyUsageFilter", self.policy_usage_filter.clone().map(Into::into)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pages_concatenate() {
        let first = json!({
            "PolicyGroups": [{"GroupName": "admins", "GroupId": "G1"}],
            "PolicyRoles": [{"RoleName": "deploy", "RoleId": "R1"}]
        });
        let second = json!({
            "PolicyGroups": [{"GroupName": "ops", "GroupId": "G2"}],
            "PolicyUsers": [{"UserName": "alice", "UserId": "U1"}]
        });

        let mut entities = PolicyEntities::from_wire(first.as_object().unwrap()).unwrap();
        entities.absorb(PolicyEntities::from_wire(second.as_object().unwrap()).unwrap());

        assert_eq!(entities.policy_groups.len(), 2);
        assert_eq!(entities.policy_groups[1].group_name, "ops");
        assert_eq!(entities.policy_users.len(), 1);
        assert_eq!(entities.policy_roles.len(), 1);
        assert_eq!(entities.len(), 4);
    }

    #[test]
    fn test_input_params_skip_unset_filters() {
        let mut input = ListEntitiesForPolicyInput::new("arn:aws:iam::aws:policy/ReadOnlyAccess");
        input.entity_filter = Some("Role".into());
        let params = input.to_params();
        assert_eq!(params.len(), 2);
        assert_eq!(params["EntityFilter"], json!("Role"));
    }
}
