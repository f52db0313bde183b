//! Security Token Service facade.

use super::Binding;
use crate::client::ClientSource;
use crate::config::ClientConfig;
use crate::error::{BoxError, FacadeResult};
use crate::guard::guard;
use crate::types::sts::{AssumeRoleInput, AssumeRoleOutput, CallerIdentity};
use crate::types::FromWire;
use crate::wire::WireMap;
use tracing::info;

const SERVICE: &str = "sts";

/// Service for STS operations.
#[derive(Debug, Clone, Default)]
pub struct StsService {
    binding: Binding,
}

impl StsService {
    /// Create a new STS service.
    pub fn new(source: impl Into<ClientSource>) -> Self {
        Self {
            binding: Binding::new(source.into()),
        }
    }

    /// Use `config` instead of the session's default client policy.
    pub fn with_client_config(mut self, config: ClientConfig) -> Self {
        self.binding = self.binding.with_config(config);
        self
    }

    /// Assume `role_arn` under the default session name.
    pub async fn assume_role(&self, role_arn: &str) -> FacadeResult<AssumeRoleOutput> {
        self.assume_role_with(&AssumeRoleInput::new(role_arn)).await
    }

    /// Assume a role.
    ///
    /// Issues exactly one request; the credentials are returned as issued.
    pub async fn assume_role_with(&self, input: &AssumeRoleInput) -> FacadeResult<AssumeRoleOutput> {
        guard(crate::operation!("assume_role"), async {
            let client = self.binding.client(SERVICE).await?;
            let response = client.invoke("AssumeRole", input.to_params()).await?;
            let output = AssumeRoleOutput::from_wire(&response)?;

            info!(
                role_arn = %input.role_arn,
                access_key_id = %output.credentials.access_key_id(),
                expiration = ?output.credentials.expiration(),
                "Assumed role"
            );
            Ok::<_, BoxError>(output)
        })
        .await
    }

    /// Identity of the credentials in use.
    pub async fn get_caller_identity(&self) -> FacadeResult<CallerIdentity> {
        guard(crate::operation!("get_caller_identity"), async {
            let client = self.binding.client(SERVICE).await?;
            let response = client.invoke("GetCallerIdentity", WireMap::new()).await?;
            Ok::<_, BoxError>(CallerIdentity::from_wire(&response)?)
        })
        .await
    }

    /// Check that the credentials in use are accepted.
    ///
    /// Returns `true` on success. On failure the error message is prefixed
    /// with "AWS credentials validation failed".
    pub async fn validate_credentials(&self) -> FacadeResult<bool> {
        guard(crate::operation!("validate_credentials"), async {
            self.get_caller_identity().await?;
            Ok::<_, BoxError>(true)
        })
        .await
        .map_err(|e| e.with_context("AWS credentials validation failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientHandle;
    use crate::error::{ErrorKind, ProviderError, INVALID_CREDENTIALS_MESSAGE};
    use crate::mocks::{MockProviderClient, TestFixtures};
    use serde_json::json;
    use std::sync::Arc;

    fn service(mock: &Arc<MockProviderClient>) -> StsService {
        StsService::new(ClientHandle::new("sts", "us-east-2", mock.clone()))
    }

    #[tokio::test]
    async fn test_assume_role_sends_session_name() {
        let mock = Arc::new(MockProviderClient::new());
        mock.push_response("AssumeRole", TestFixtures::assume_role_response("ASIAONE"));

        let output = service(&mock)
            .assume_role("arn:aws:iam::1:role/deploy")
            .await
            .unwrap();

        assert_eq!(output.credentials.access_key_id(), "ASIAONE");
        let calls = mock.calls_for("AssumeRole");
        assert_eq!(calls[0]["RoleArn"], json!("arn:aws:iam::1:role/deploy"));
        assert_eq!(calls[0]["RoleSessionName"], json!("facade-session"));
        assert!(!calls[0].contains_key("DurationSeconds"));
    }

    #[tokio::test]
    async fn test_assume_role_without_expiration_fails() {
        let mock = Arc::new(MockProviderClient::new());
        let mut response = TestFixtures::assume_role_response("ASIANOEXP");
        response["Credentials"].as_object_mut().unwrap().remove("Expiration");
        mock.push_response("AssumeRole", response);

        let err = service(&mock)
            .assume_role("arn:aws:iam::1:role/deploy")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert!(err.message().contains("Expiration"));
        assert_eq!(err.operation().name(), "assume_role");
    }

    #[tokio::test]
    async fn test_get_caller_identity() {
        let mock = Arc::new(MockProviderClient::new());
        mock.push_response(
            "GetCallerIdentity",
            json!({"Account": "123456789012", "UserId": "AIDA", "Arn": "arn:aws:iam::123456789012:user/ci"}),
        );

        let identity = service(&mock).get_caller_identity().await.unwrap();
        assert_eq!(identity.account, "123456789012");
    }

    #[tokio::test]
    async fn test_validate_credentials_success() {
        let mock = Arc::new(MockProviderClient::new());
        mock.push_response(
            "GetCallerIdentity",
            json!({"Account": "1", "UserId": "u", "Arn": "a"}),
        );
        assert!(service(&mock).validate_credentials().await.unwrap());
    }

    #[tokio::test]
    async fn test_validate_credentials_prefixes_service_faults() {
        let mock = Arc::new(MockProviderClient::new());
        mock.push_error(
            "GetCallerIdentity",
            ProviderError::service("AccessDenied", "not allowed"),
        );

        let err = service(&mock).validate_credentials().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServiceFault);
        assert_eq!(
            err.message(),
            "AWS credentials validation failed: AccessDenied: not allowed"
        );
        assert_eq!(err.operation().name(), "validate_credentials");
        assert_eq!(err.error_code(), Some("AccessDenied"));
    }

    #[tokio::test]
    async fn test_validate_credentials_keeps_guidance_text() {
        let mock = Arc::new(MockProviderClient::new());
        mock.push_error("GetCallerIdentity", TestFixtures::invalid_token_error());

        let err = service(&mock).validate_credentials().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCredentials);
        assert_eq!(err.message(), INVALID_CREDENTIALS_MESSAGE);
    }
}
