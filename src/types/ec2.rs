//! EC2 records.

use serde::{Deserialize, Serialize};

/// A security group. Missing string members read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SecurityGroup {
    /// Group ID.
    pub group_id: String,
    /// Group name.
    pub group_name: String,
    /// Description.
    pub description: String,
    /// VPC the group belongs to.
    pub vpc_id: String,
}

serde_from_wire!(SecurityGroup);
