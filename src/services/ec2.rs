//! EC2 facade.

use super::Binding;
use crate::client::ClientSource;
use crate::error::FacadeResult;
use crate::guard::guard;
use crate::pagination::{OperationPaginator, TokenSpec};
use crate::types::ec2::SecurityGroup;
use crate::types::FromWire;
use crate::wire::WireMap;

const SERVICE: &str = "ec2";

/// Service for EC2 operations.
#[derive(Debug, Clone, Default)]
pub struct Ec2Service {
    binding: Binding,
}

impl Ec2Service {
    /// Create a new EC2 service.
    pub fn new(source: impl Into<ClientSource>) -> Self {
        Self {
            binding: Binding::new(source.into()),
        }
    }

    /// Every security group in the region.
    pub async fn describe_security_groups(&self) -> FacadeResult<Vec<SecurityGroup>> {
        guard(crate::operation!("describe_security_groups"), async {
            let client = self.binding.client(SERVICE).await?;
            OperationPaginator::new(
                &client,
                "DescribeSecurityGroups",
                WireMap::new(),
                TokenSpec::NEXT_TOKEN,
            )
            .collect("SecurityGroups", SecurityGroup::from_wire)
            .await
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientHandle;
    use crate::mocks::MockProviderClient;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_describe_security_groups() {
        let mock = Arc::new(MockProviderClient::new());
        mock.push_response(
            "DescribeSecurityGroups",
            json!({"SecurityGroups": [{"GroupId": "sg-1", "GroupName": "web", "Description": "http", "VpcId": "vpc-1"}], "NextToken": "n"}),
        );
        mock.push_response(
            "DescribeSecurityGroups",
            json!({"SecurityGroups": [{"GroupId": "sg-2", "GroupName": "default"}]}),
        );
        let service = Ec2Service::new(ClientHandle::new(SERVICE, "us-east-2", mock.clone()));

        let groups = service.describe_security_groups().await.unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].group_id, "sg-2");
        assert_eq!(groups[1].vpc_id, "");
    }
}
