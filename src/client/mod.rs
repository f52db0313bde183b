//! Provider clients and handles.
//!
//! The facade does not sign or send requests itself. A [`ClientFactory`]
//! supplied by the embedding application builds [`ProviderClient`]s, each able
//! to invoke a named operation with a wire-format parameter map. A
//! [`ClientHandle`] binds one client to its service and region and is never
//! mutated after construction.

use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::error::{BoxError, ProviderError};
use crate::session::{default_session, Session};
use crate::wire::WireMap;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// A provider API client bound to one service, region and credential set.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Invoke `operation` (e.g. `"AssumeRole"`) with `params`.
    async fn invoke(&self, operation: &str, params: WireMap) -> Result<WireMap, ProviderError>;
}

/// Everything a factory needs to build a client.
#[derive(Debug, Clone)]
pub struct ClientSpec {
    /// Service name, e.g. `"sts"`.
    pub service: String,
    /// Region the client is bound to.
    pub region: String,
    /// Credentials the client signs with.
    pub credentials: Credentials,
    /// Transport policy.
    pub config: ClientConfig,
}

/// Builds provider clients.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    /// Build a client for `spec`.
    async fn create_client(&self, spec: &ClientSpec) -> Result<Arc<dyn ProviderClient>, ProviderError>;
}

/// A client bound to a `(service, region)` pair.
///
/// Cheap to clone; clones share the underlying client.
#[derive(Clone)]
pub struct ClientHandle {
    service: Arc<str>,
    region: Arc<str>,
    client: Arc<dyn ProviderClient>,
}

impl ClientHandle {
    /// Wrap an existing client.
    pub fn new(
        service: impl Into<Arc<str>>,
        region: impl Into<Arc<str>>,
        client: Arc<dyn ProviderClient>,
    ) -> Self {
        Self {
            service: service.into(),
            region: region.into(),
            client,
        }
    }

    /// Build a fresh client through `factory`.
    pub(crate) async fn connect(factory: &dyn ClientFactory, spec: &ClientSpec) -> Result<Self, ProviderError> {
        debug!(
            service = %spec.service,
            region = %spec.region,
            access_key_id = %spec.credentials.access_key_id(),
            "Building client"
        );
        let client = factory.create_client(spec).await?;
        Ok(Self::new(spec.service.as_str(), spec.region.as_str(), client))
    }

    /// Service name.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Region the client is bound to.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Invoke an operation.
    pub async fn invoke(&self, operation: &str, params: WireMap) -> Result<WireMap, ProviderError> {
        trace!(
            service = %self.service,
            region = %self.region,
            operation,
            "Invoking operation"
        );
        self.client.invoke(operation, params).await
    }
}

impl fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientHandle")
            .field("service", &self.service)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

/// Temporary identity that services build fresh clients from.
#[derive(Clone)]
pub struct Delegation {
    factory: Arc<dyn ClientFactory>,
    credentials: Credentials,
    region: String,
    config: ClientConfig,
}

impl Delegation {
    /// Create a delegation.
    pub fn new(
        factory: Arc<dyn ClientFactory>,
        credentials: Credentials,
        region: impl Into<String>,
        config: ClientConfig,
    ) -> Self {
        Self {
            factory,
            credentials,
            region: region.into(),
            config,
        }
    }

    /// The delegated credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The region clients are bound to.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Build a fresh client for `service`.
    pub(crate) async fn connect(&self, service: &str) -> Result<ClientHandle, ProviderError> {
        self.credentials.ensure_valid()?;
        let spec = ClientSpec {
            service: service.to_string(),
            region: self.region.clone(),
            credentials: self.credentials.clone(),
            config: self.config.clone(),
        };
        ClientHandle::connect(self.factory.as_ref(), &spec).await
    }
}

impl fmt::Debug for Delegation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegation")
            .field("credentials", &self.credentials)
            .field("region", &self.region)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Where a service facade gets its client from.
///
/// Resolved on every call, so nothing is bound before the default session is
/// installed.
#[derive(Clone, Debug, Default)]
pub enum ClientSource {
    /// The process-wide default session.
    #[default]
    Default,
    /// An explicit session.
    Session(Arc<Session>),
    /// An explicit client, used as-is.
    Handle(ClientHandle),
    /// A fresh client per call, built from delegated credentials.
    Delegated(Arc<Delegation>),
}

impl ClientSource {
    /// Resolve a client for `service`.
    ///
    /// `config` overrides the session's default policy for default clients;
    /// explicit handles and delegations ignore it.
    pub(crate) async fn resolve(
        &self,
        service: &str,
        config: Option<&ClientConfig>,
    ) -> Result<ClientHandle, BoxError> {
        match self {
            ClientSource::Default => Ok(default_session()?.client_with(service, config).await?),
            ClientSource::Session(session) => Ok(session.client_with(service, config).await?),
            ClientSource::Handle(handle) => Ok(handle.clone()),
            ClientSource::Delegated(delegation) => Ok(delegation.connect(service).await?),
        }
    }
}

impl From<ClientHandle> for ClientSource {
    fn from(handle: ClientHandle) -> Self {
        ClientSource::Handle(handle)
    }
}

impl From<Arc<Session>> for ClientSource {
    fn from(session: Arc<Session>) -> Self {
        ClientSource::Session(session)
    }
}

impl From<Delegation> for ClientSource {
    fn from(delegation: Delegation) -> Self {
        ClientSource::Delegated(Arc::new(delegation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CredentialsError;
    use crate::mocks::{MockClientFactory, MockProviderClient, TestFixtures};
    use serde_json::json;

    #[tokio::test]
    async fn test_handle_invokes_client() {
        let mock = Arc::new(MockProviderClient::new());
        mock.push_response("ListQueues", json!({"QueueUrls": []}));
        let handle = ClientHandle::new("sqs", "eu-west-1", mock.clone());

        let response = handle.invoke("ListQueues", WireMap::new()).await.unwrap();
        assert!(response.contains_key("QueueUrls"));
        assert_eq!(handle.service(), "sqs");
        assert_eq!(handle.region(), "eu-west-1");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_handle_source_ignores_default_session() {
        let handle = ClientHandle::new("s3", "us-west-2", Arc::new(MockProviderClient::new()));
        let resolved = ClientSource::from(handle)
            .resolve("s3", None)
            .await
            .unwrap();
        assert_eq!(resolved.region(), "us-west-2");
    }

    #[tokio::test]
    async fn test_delegation_builds_fresh_clients() {
        let factory = Arc::new(MockClientFactory::new());
        let delegation = Delegation::new(
            factory.clone(),
            TestFixtures::temporary_credentials(),
            "eu-central-1",
            ClientConfig::default(),
        );
        let source = ClientSource::from(delegation);

        source.resolve("ec2", None).await.unwrap();
        source.resolve("ec2", None).await.unwrap();

        let specs = factory.specs();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].service, "ec2");
        assert_eq!(specs[0].region, "eu-central-1");
        assert_eq!(specs[0].credentials.access_key_id(), "ASIATEMPORARY");
    }

    #[tokio::test]
    async fn test_delegation_rejects_expired_credentials() {
        let factory = Arc::new(MockClientFactory::new());
        let delegation = Delegation::new(
            factory.clone(),
            TestFixtures::expired_credentials(),
            "eu-central-1",
            ClientConfig::default(),
        );

        let err = delegation.connect("ec2").await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Credentials(CredentialsError::Expired { .. })
        ));
        assert!(factory.specs().is_empty());
    }
}
