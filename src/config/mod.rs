//! Configuration types.
//!
//! [`SessionConfig`] describes where the default session gets its region,
//! ambient credentials and clients from. [`ClientConfig`] is the per-client
//! policy (retries, timeouts, endpoint) handed to the client factory.

mod retry;

pub use retry::{ParseRetryModeError, RetryConfig, RetryMode};

use crate::client::ClientFactory;
use crate::credentials::{ChainCredentialsProvider, Credentials, CredentialsProvider, StaticCredentialsProvider};
use crate::error::SessionError;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Region used when neither the caller nor the environment names one.
pub const DEFAULT_REGION: &str = "us-east-2";

/// Environment variable overriding the maximum attempts.
pub const MAX_ATTEMPTS_ENV: &str = "AWS_FACADE_MAX_ATTEMPTS";

/// Environment variable overriding the retry mode.
pub const RETRY_MODE_ENV: &str = "AWS_FACADE_RETRY_MODE";

/// Per-client policy handed to the client factory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ClientConfig {
    /// Retry policy the transport should apply.
    pub retry: RetryConfig,

    /// Connection timeout.
    pub connect_timeout: Option<Duration>,

    /// Read timeout for individual requests.
    pub read_timeout: Option<Duration>,

    /// Custom endpoint URL.
    pub endpoint: Option<Url>,
}

impl ClientConfig {
    /// Create a default client configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Set the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the read timeout.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Set a custom endpoint.
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }
}

/// Configuration for a [`Session`](crate::session::Session).
#[derive(Clone)]
pub struct SessionConfig {
    /// Default region for every client built by the session.
    pub region: String,

    /// Ambient credentials.
    pub credentials_provider: Arc<dyn CredentialsProvider>,

    /// Factory building provider clients.
    pub client_factory: Arc<dyn ClientFactory>,

    /// Default client policy.
    pub client_config: ClientConfig,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("region", &self.region)
            .field("credentials_provider", &self.credentials_provider.name())
            .field("client_config", &self.client_config)
            .finish_non_exhaustive()
    }
}

impl SessionConfig {
    /// Create a new configuration builder.
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }
}

/// Builder for [`SessionConfig`].
#[derive(Default)]
pub struct SessionConfigBuilder {
    region: Option<String>,
    credentials_provider: Option<Arc<dyn CredentialsProvider>>,
    client_factory: Option<Arc<dyn ClientFactory>>,
    client_config: Option<ClientConfig>,
    max_attempts: Option<u32>,
    retry_mode: Option<RetryMode>,
}

impl SessionConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the ambient credentials provider.
    pub fn credentials_provider(mut self, provider: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials_provider = Some(provider);
        self
    }

    /// Use fixed ambient credentials.
    pub fn credentials(self, credentials: Credentials) -> Self {
        self.credentials_provider(Arc::new(StaticCredentialsProvider::new(credentials)))
    }

    /// Set the client factory.
    pub fn client_factory(mut self, factory: Arc<dyn ClientFactory>) -> Self {
        self.client_factory = Some(factory);
        self
    }

    /// Set the default client policy.
    pub fn client_config(mut self, config: ClientConfig) -> Self {
        self.client_config = Some(config);
        self
    }

    /// Override the maximum attempts of the default policy.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Override the retry mode of the default policy.
    pub fn retry_mode(mut self, mode: RetryMode) -> Self {
        self.retry_mode = Some(mode);
        self
    }

    /// Load settings from environment variables.
    ///
    /// Reads `AWS_REGION` (then `AWS_DEFAULT_REGION`), `AWS_ENDPOINT_URL`,
    /// `AWS_FACADE_MAX_ATTEMPTS` and `AWS_FACADE_RETRY_MODE`. Unparseable
    /// values are ignored.
    pub fn from_env(self) -> Self {
        self.from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(region) = non_empty("AWS_REGION").or_else(|| non_empty("AWS_DEFAULT_REGION")) {
            self.region = Some(region);
        }

        if let Some(endpoint) = non_empty("AWS_ENDPOINT_URL") {
            match Url::parse(&endpoint) {
                Ok(url) => {
                    let mut config = self.client_config.take().unwrap_or_default();
                    config.endpoint = Some(url);
                    self.client_config = Some(config);
                }
                Err(e) => debug!(error = %e, "Ignoring invalid AWS_ENDPOINT_URL"),
            }
        }

        if let Some(attempts) = non_empty(MAX_ATTEMPTS_ENV).and_then(|v| v.parse().ok()) {
            self.max_attempts = Some(attempts);
        }

        if let Some(mode) = non_empty(RETRY_MODE_ENV).and_then(|v| v.parse().ok()) {
            self.retry_mode = Some(mode);
        }

        self
    }

    /// Build the configuration.
    ///
    /// The region falls back to [`DEFAULT_REGION`]; credentials fall back to
    /// the environment-then-profile chain. A client factory is required.
    pub fn build(self) -> Result<SessionConfig, SessionError> {
        let region = self.region.unwrap_or_else(|| DEFAULT_REGION.to_string());
        if region.trim().is_empty() {
            return Err(SessionError::MissingRegion);
        }

        let client_factory = self
            .client_factory
            .ok_or(SessionError::MissingClientFactory)?;

        let mut client_config = self.client_config.unwrap_or_default();
        if let Some(attempts) = self.max_attempts {
            client_config.retry.max_attempts = attempts;
        }
        if let Some(mode) = self.retry_mode {
            client_config.retry.mode = mode;
        }

        Ok(SessionConfig {
            region,
            credentials_provider: self
                .credentials_provider
                .unwrap_or_else(|| Arc::new(ChainCredentialsProvider::new())),
            client_factory,
            client_config,
        })
    }
}
