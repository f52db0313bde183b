//! Sessions and the process-wide default.
//!
//! A [`Session`] owns a default region, an ambient credentials provider and a
//! client factory. It builds one default client per service the first time
//! that service is used and hands out clones of it afterwards.
//!
//! The process-wide default session is installed once with
//! [`install_default_session`]. There is no re-initialisation path: a fresh
//! process is needed to pick up changed ambient identity.

use crate::client::{ClientFactory, ClientHandle, ClientSpec};
use crate::config::{ClientConfig, SessionConfig};
use crate::credentials::{Credentials, CredentialsProvider};
use crate::error::{FacadeResult, ProviderError, SessionError};
use crate::guard::guard;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::info;

static DEFAULT_SESSION: OnceCell<Arc<Session>> = OnceCell::new();

/// Install the process-wide default session.
///
/// Fails with [`SessionError::AlreadyInstalled`] if one is already present.
pub fn install_default_session(session: Session) -> Result<Arc<Session>, SessionError> {
    let session = Arc::new(session);
    DEFAULT_SESSION
        .set(session.clone())
        .map_err(|_| SessionError::AlreadyInstalled)?;
    info!(region = %session.region(), "Installed default session");
    Ok(session)
}

/// The process-wide default session.
pub fn default_session() -> Result<Arc<Session>, SessionError> {
    DEFAULT_SESSION.get().cloned().ok_or(SessionError::NotInstalled)
}

/// Default clients are keyed by service and policy.
type ClientKey = (String, ClientConfig);

/// A region, an ambient identity and the clients built from them.
pub struct Session {
    region: String,
    credentials_provider: Arc<dyn CredentialsProvider>,
    factory: Arc<dyn ClientFactory>,
    client_config: ClientConfig,
    clients: Mutex<HashMap<ClientKey, Arc<tokio::sync::OnceCell<ClientHandle>>>>,
}

impl Session {
    /// Create a session from configuration.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            region: config.region,
            credentials_provider: config.credentials_provider,
            factory: config.client_factory,
            client_config: config.client_config,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Create a session from the environment with the given factory.
    pub fn from_env(factory: Arc<dyn ClientFactory>) -> Result<Self, SessionError> {
        let config = SessionConfig::builder()
            .from_env()
            .client_factory(factory)
            .build()?;
        Ok(Self::new(config))
    }

    /// Default region.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Factory used to build clients.
    pub fn factory(&self) -> &Arc<dyn ClientFactory> {
        &self.factory
    }

    /// Default client policy.
    pub fn client_config(&self) -> &ClientConfig {
        &self.client_config
    }

    /// Ambient credentials.
    pub(crate) async fn credentials(&self) -> Result<Credentials, ProviderError> {
        Ok(self.credentials_provider.get_credentials().await?)
    }

    /// The default client for `service`.
    pub async fn client(&self, service: &str) -> FacadeResult<ClientHandle> {
        guard(crate::operation!("client"), self.client_with(service, None)).await
    }

    /// The default client for `service` under a specific policy.
    ///
    /// Built on first use and reused afterwards. A failed build is not
    /// remembered; the next call tries again.
    pub(crate) async fn client_with(
        &self,
        service: &str,
        config: Option<&ClientConfig>,
    ) -> Result<ClientHandle, ProviderError> {
        let config = config.unwrap_or(&self.client_config).clone();
        let cell = {
            let mut clients = self.clients.lock();
            clients
                .entry((service.to_string(), config.clone()))
                .or_default()
                .clone()
        };

        cell.get_or_try_init(|| async {
            let credentials = self.credentials().await?;
            let spec = ClientSpec {
                service: service.to_string(),
                region: self.region.clone(),
                credentials,
                config,
            };
            ClientHandle::connect(self.factory.as_ref(), &spec).await
        })
        .await
        .cloned()
    }

    /// A fresh, uncached client bound to `credentials`.
    ///
    /// `region` falls back to the session's region.
    pub(crate) async fn connect(
        &self,
        service: &str,
        credentials: Credentials,
        region: Option<&str>,
        config: Option<&ClientConfig>,
    ) -> Result<ClientHandle, ProviderError> {
        credentials.ensure_valid()?;
        let spec = ClientSpec {
            service: service.to_string(),
            region: region.unwrap_or(&self.region).to_string(),
            credentials,
            config: config.unwrap_or(&self.client_config).clone(),
        };
        ClientHandle::connect(self.factory.as_ref(), &spec).await
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("region", &self.region)
            .field("credentials_provider", &self.credentials_provider.name())
            .field("client_config", &self.client_config)
            .finish_non_exhaustive()
    }
}
