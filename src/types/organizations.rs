//! Organizations records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use super::Tag;

/// A member account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Account {
    /// Account ID.
    pub id: String,
    /// Account ARN.
    pub arn: String,
    /// Root email address.
    pub email: String,
    /// Friendly name.
    pub name: String,
    /// `ACTIVE`, `SUSPENDED` or `PENDING_CLOSURE`.
    pub status: String,
    /// `INVITED` or `CREATED`.
    pub joined_method: String,
    /// When the account joined the organization.
    #[serde(deserialize_with = "crate::wire::timestamp::required")]
    pub joined_timestamp: DateTime<Utc>,
}

serde_from_wire!(Account);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FromWire;
    use serde_json::json;

    #[test]
    fn test_account_from_wire() {
        let map = json!({
            "Id": "111122223333",
            "Arn": "arn:aws:organizations::1:account/o-x/111122223333",
            "Email": "ops@example.com",
            "Name": "ops",
            "Status": "ACTIVE",
            "JoinedMethod": "CREATED",
            "JoinedTimestamp": 1700000000
        });
        let account = Account::from_wire(map.as_object().unwrap()).unwrap();
        assert_eq!(account.id, "111122223333");
        assert_eq!(account.joined_timestamp.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_account_missing_timestamp() {
        let map = json!({
            "Id": "1", "Arn": "a", "Email": "e", "Name": "n",
            "Status": "ACTIVE", "JoinedMethod": "CREATED"
        });
        assert!(Account::from_wire(map.as_object().unwrap()).is_err());
    }
}
