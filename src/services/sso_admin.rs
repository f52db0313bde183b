//! IAM Identity Center administration facade.

use super::Binding;
use crate::client::ClientSource;
use crate::error::{BoxError, FacadeResult};
use crate::guard::guard;
use crate::types::decode_nested;
use crate::types::sso_admin::{AccountAssignmentInput, AccountAssignmentStatus};
use tracing::info;

const SERVICE: &str = "sso-admin";

/// Service for Identity Center account assignments.
#[derive(Debug, Clone, Default)]
pub struct SsoAdminService {
    binding: Binding,
}

impl SsoAdminService {
    /// Create a new SSO admin service.
    pub fn new(source: impl Into<ClientSource>) -> Self {
        Self {
            binding: Binding::new(source.into()),
        }
    }

    /// Grant a user or group a permission set in one account.
    ///
    /// The assignment is provisioned asynchronously; the returned status
    /// carries the request ID to poll.
    pub async fn create_account_assignment(
        &self,
        input: &AccountAssignmentInput,
    ) -> FacadeResult<AccountAssignmentStatus> {
        guard(crate::operation!("create_account_assignment"), async {
            let client = self.binding.client(SERVICE).await?;
            let response = client
                .invoke("CreateAccountAssignment", input.to_params())
                .await?;
            let status: AccountAssignmentStatus =
                decode_nested(&response, "AccountAssignmentCreationStatus")?;
            info!(
                target_id = %input.target_id,
                request_id = %status.request_id,
                status = %status.status,
                "Requested account assignment"
            );
            Ok::<_, BoxError>(status)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientHandle;
    use crate::mocks::MockProviderClient;
    use crate::types::sso_admin::PrincipalType;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_account_assignment() {
        let mock = Arc::new(MockProviderClient::new());
        mock.push_response(
            "CreateAccountAssignment",
            json!({"AccountAssignmentCreationStatus": {"Status": "IN_PROGRESS", "RequestId": "req-1"}}),
        );
        let service = SsoAdminService::new(ClientHandle::new(SERVICE, "us-east-1", mock.clone()));

        let input = AccountAssignmentInput {
            instance_arn: "arn:aws:sso:::instance/ssoins-1".into(),
            permission_set_arn: "arn:aws:sso:::permissionSet/ssoins-1/ps-1".into(),
            principal_id: "u-1".into(),
            principal_type: PrincipalType::User,
            target_id: "111122223333".into(),
        };
        let status = service.create_account_assignment(&input).await.unwrap();

        assert_eq!(status.status, "IN_PROGRESS");
        assert_eq!(status.request_id, "req-1");
        let call = &mock.calls_for("CreateAccountAssignment")[0];
        assert_eq!(call["TargetType"], json!("AWS_ACCOUNT"));
        assert_eq!(call["PrincipalType"], json!("USER"));
    }
}
