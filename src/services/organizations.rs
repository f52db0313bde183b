//! AWS Organizations facade.

use super::Binding;
use crate::client::ClientSource;
use crate::error::{BoxError, FacadeResult};
use crate::guard::guard;
use crate::pagination::{OperationPaginator, TokenSpec};
use crate::types::organizations::{Account, Tag};
use crate::types::{decode_nested, FromWire};
use crate::wire::{self, WireMap};

const SERVICE: &str = "organizations";

/// Service for Organizations queries.
#[derive(Debug, Clone, Default)]
pub struct OrganizationsService {
    binding: Binding,
}

impl OrganizationsService {
    /// Create a new Organizations service.
    pub fn new(source: impl Into<ClientSource>) -> Self {
        Self {
            binding: Binding::new(source.into()),
        }
    }

    /// One member account.
    pub async fn describe_account(&self, account_id: &str) -> FacadeResult<Account> {
        guard(crate::operation!("describe_account"), async {
            let client = self.binding.client(SERVICE).await?;
            let params = wire::params([("AccountId", Some(account_id.into()))]);
            let response = client.invoke("DescribeAccount", params).await?;
            Ok::<_, BoxError>(decode_nested(&response, "Account")?)
        })
        .await
    }

    /// Every account in the organization.
    pub async fn list_accounts(&self) -> FacadeResult<Vec<Account>> {
        guard(crate::operation!("list_accounts"), async {
            let client = self.binding.client(SERVICE).await?;
            OperationPaginator::new(&client, "ListAccounts", WireMap::new(), TokenSpec::NEXT_TOKEN)
                .collect("Accounts", Account::from_wire)
                .await
        })
        .await
    }

    /// Tags on an account, OU, root or policy.
    pub async fn list_tags_for_resource(&self, resource_id: &str) -> FacadeResult<Vec<Tag>> {
        guard(crate::operation!("list_tags_for_resource"), async {
            let client = self.binding.client(SERVICE).await?;
            let params = wire::params([("ResourceId", Some(resource_id.into()))]);
            OperationPaginator::new(&client, "ListTagsForResource", params, TokenSpec::NEXT_TOKEN)
                .collect("Tags", Tag::from_wire)
                .await
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientHandle;
    use crate::error::ErrorKind;
    use crate::mocks::MockProviderClient;
    use serde_json::json;
    use std::sync::Arc;

    fn service(mock: &Arc<MockProviderClient>) -> OrganizationsService {
        OrganizationsService::new(ClientHandle::new(SERVICE, "us-east-1", mock.clone()))
    }

    fn account(id: &str) -> serde_json::Value {
        json!({
            "Id": id,
            "Arn": format!("arn:aws:organizations::1:account/o-x/{id}"),
            "Email": "ops@example.com",
            "Name": "ops",
            "Status": "ACTIVE",
            "JoinedMethod": "INVITED",
            "JoinedTimestamp": "2023-05-01T12:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_describe_account() {
        let mock = Arc::new(MockProviderClient::new());
        mock.push_response("DescribeAccount", json!({"Account": account("111122223333")}));

        let found = service(&mock).describe_account("111122223333").await.unwrap();
        assert_eq!(found.joined_method, "INVITED");
        assert_eq!(mock.calls_for("DescribeAccount")[0]["AccountId"], json!("111122223333"));
    }

    #[tokio::test]
    async fn test_describe_account_without_record_is_unknown() {
        let mock = Arc::new(MockProviderClient::new());
        mock.push_response("DescribeAccount", json!({}));

        let err = service(&mock).describe_account("1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }

    #[tokio::test]
    async fn test_list_accounts_and_tags() {
        let mock = Arc::new(MockProviderClient::new());
        mock.push_response("ListAccounts", json!({"Accounts": [account("1")], "NextToken": "n"}));
        mock.push_response("ListAccounts", json!({"Accounts": [account("2")]}));
        mock.push_response(
            "ListTagsForResource",
            json!({"Tags": [{"Key": "team", "Value": "platform"}]}),
        );

        let svc = service(&mock);
        let ids: Vec<_> = svc.list_accounts().await.unwrap().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, ["1", "2"]);

        let tags = svc.list_tags_for_resource("1").await.unwrap();
        assert_eq!(tags, vec![Tag::new("team", "platform")]);
        assert_eq!(mock.calls_for("ListTagsForResource")[0]["ResourceId"], json!("1"));
    }
}
