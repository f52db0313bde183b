//! Role delegation.
//!
//! A [`CredentialBroker`] turns a role ARN into temporary credentials and
//! builds clients bound to them. It keeps no state between calls: every
//! assumption is a fresh request to the identity provider and every client
//! it hands out is new.
//!
//! ```rust,no_run
//! use aws_facade::broker::CredentialBroker;
//!
//! # async fn run() -> aws_facade::Result<()> {
//! let broker = CredentialBroker::from_default()?;
//! let s3 = broker
//!     .client_with_role("s3", "arn:aws:iam::123456789012:role/reader", None)
//!     .await?;
//! # let _ = s3;
//! # Ok(())
//! # }
//! ```

use crate::client::{ClientHandle, Delegation};
use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::error::{BoxError, FacadeResult, ProviderError};
use crate::guard::{guard, guard_sync};
use crate::services::StsService;
use crate::session::{default_session, Session};
use crate::types::sts::{AssumeRoleInput, DEFAULT_ROLE_SESSION_NAME};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const STS: &str = "sts";

/// Assumes roles and builds clients from the resulting credentials.
#[derive(Debug, Clone)]
pub struct CredentialBroker {
    session: Arc<Session>,
    sts: Option<ClientHandle>,
    session_name: String,
    duration: Option<Duration>,
    client_config: Option<ClientConfig>,
}

impl CredentialBroker {
    /// Create a broker that assumes roles with the session's identity.
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            sts: None,
            session_name: DEFAULT_ROLE_SESSION_NAME.to_string(),
            duration: None,
            client_config: None,
        }
    }

    /// Create a broker on the process-wide default session.
    pub fn from_default() -> FacadeResult<Self> {
        guard_sync(crate::operation!("from_default"), || {
            default_session().map(Self::new)
        })
    }

    /// Assume roles through `sts` instead of the session's STS client.
    pub fn with_sts_client(mut self, sts: ClientHandle) -> Self {
        self.sts = Some(sts);
        self
    }

    /// Role session name sent with every assumption.
    pub fn with_session_name(mut self, name: impl Into<String>) -> Self {
        self.session_name = name.into();
        self
    }

    /// Requested lifetime of assumed credentials.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Policy for the clients this broker builds.
    pub fn with_client_config(mut self, config: ClientConfig) -> Self {
        self.client_config = Some(config);
        self
    }

    /// The session clients are built from.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Assume `role_arn`, returning the credentials exactly as issued.
    ///
    /// Issues one request per call; nothing is cached. `region` selects the
    /// STS endpoint and falls back to the session's region.
    pub async fn assume(&self, role_arn: &str, region: Option<&str>) -> FacadeResult<Credentials> {
        guard(crate::operation!("assume"), async {
            let duration_seconds = self
                .duration
                .map(|d| u32::try_from(d.as_secs()))
                .transpose()
                .map_err(|_| ProviderError::other("role session duration does not fit in u32 seconds"))?;
            let sts = self.sts_client(region).await?;
            debug!(role_arn, region = %sts.region(), "Assuming role");

            let input = AssumeRoleInput {
                role_arn: role_arn.to_string(),
                role_session_name: self.session_name.clone(),
                duration_seconds,
            };
            let output = StsService::new(sts).assume_role_with(&input).await?;
            Ok::<_, BoxError>(output.credentials)
        })
        .await
    }

    /// A fresh client for `service` bound to `credentials`.
    ///
    /// Expired credentials are rejected before the factory is called.
    pub async fn client_for(
        &self,
        service: &str,
        credentials: &Credentials,
        region: Option<&str>,
    ) -> FacadeResult<ClientHandle> {
        guard(crate::operation!("client_for"), async {
            self.session
                .connect(service, credentials.clone(), region, self.client_config.as_ref())
                .await
        })
        .await
    }

    /// Assume `role_arn`, then build a client for `service` from the result.
    ///
    /// Every call performs its own assumption. If the assumption fails no
    /// client is built.
    pub async fn client_with_role(
        &self,
        service: &str,
        role_arn: &str,
        region: Option<&str>,
    ) -> FacadeResult<ClientHandle> {
        guard(crate::operation!("client_with_role"), async {
            let credentials = self.assume(role_arn, region).await?;
            let client = self.client_for(service, &credentials, region).await?;
            Ok::<_, BoxError>(client)
        })
        .await
    }

    /// A broker that assumes further roles as `role_arn`.
    pub async fn chain(&self, role_arn: &str, region: Option<&str>) -> FacadeResult<CredentialBroker> {
        guard(crate::operation!("chain"), async {
            let credentials = self.assume(role_arn, region).await?;
            let sts = self.client_for(STS, &credentials, region).await?;
            Ok::<_, BoxError>(self.clone().with_sts_client(sts))
        })
        .await
    }

    /// Assume `role_arn` and package the credentials for service facades.
    ///
    /// Facades built from the delegation create a fresh client per call.
    pub async fn delegation(&self, role_arn: &str, region: Option<&str>) -> FacadeResult<Delegation> {
        guard(crate::operation!("delegation"), async {
            let credentials = self.assume(role_arn, region).await?;
            Ok::<_, BoxError>(Delegation::new(
                self.session.factory().clone(),
                credentials,
                region.unwrap_or(self.session.region()),
                self.client_config
                    .clone()
                    .unwrap_or_else(|| self.session.client_config().clone()),
            ))
        })
        .await
    }

    async fn sts_client(&self, region: Option<&str>) -> Result<ClientHandle, ProviderError> {
        if let Some(sts) = &self.sts {
            return Ok(sts.clone());
        }
        match region {
            Some(region) if region != self.session.region() => {
                let credentials = self.session.credentials().await?;
                self.session
                    .connect(STS, credentials, Some(region), self.client_config.as_ref())
                    .await
            }
            _ => self.session.client_with(STS, self.client_config.as_ref()).await,
        }
    }
}
