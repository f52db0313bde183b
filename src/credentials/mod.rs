//! AWS credentials.
//!
//! [`Credentials`] is an immutable value. The default session reads ambient
//! identity through a [`CredentialsProvider`]; role assumption produces fresh
//! temporary credentials that are never cached or refreshed here.

mod chain;
mod env;
mod profile;

pub use chain::ChainCredentialsProvider;
pub use env::{EnvCredentialsProvider, AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY, AWS_SESSION_TOKEN};
pub use profile::{
    ProfileCredentialsProvider, AWS_PROFILE, AWS_SHARED_CREDENTIALS_FILE, DEFAULT_PROFILE,
};

use crate::error::{CredentialsError, DecodeError};
use crate::wire::{self, WireMap};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// AWS credentials.
#[derive(Clone)]
pub struct Credentials {
    access_key_id: String,
    secret_access_key: SecretString,
    session_token: Option<SecretString>,
    expiration: Option<DateTime<Utc>>,
}

impl Credentials {
    /// Create new long-term credentials.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: SecretString::new(secret_access_key.into()),
            session_token: None,
            expiration: None,
        }
    }

    /// Create temporary credentials with a session token.
    pub fn with_session_token(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: impl Into<String>,
    ) -> Self {
        Self {
            session_token: Some(SecretString::new(session_token.into())),
            ..Self::new(access_key_id, secret_access_key)
        }
    }

    /// Create temporary credentials with expiration.
    pub fn temporary(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: impl Into<String>,
        expiration: DateTime<Utc>,
    ) -> Self {
        Self {
            expiration: Some(expiration),
            ..Self::with_session_token(access_key_id, secret_access_key, session_token)
        }
    }

    /// Read the `Credentials` block of a role-assumption response.
    ///
    /// The values are taken exactly as the identity provider returned them.
    /// Issued credentials always expire, so `Expiration` is required.
    pub fn from_wire(map: &WireMap) -> Result<Self, DecodeError> {
        let access_key_id = wire::required_str(map, "AccessKeyId")?;
        let secret_access_key = wire::required_str(map, "SecretAccessKey")?;

        Ok(Self {
            access_key_id,
            secret_access_key: SecretString::new(secret_access_key),
            session_token: wire::optional_str(map, "SessionToken")?.map(SecretString::new),
            expiration: Some(
                wire::optional_timestamp(map, "Expiration")?
                    .ok_or_else(|| DecodeError::missing("Expiration"))?,
            ),
        })
    }

    /// Get the access key ID.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Get the secret access key.
    ///
    /// Note: This exposes the secret. Use carefully and avoid logging.
    pub fn secret_access_key(&self) -> &str {
        self.secret_access_key.expose_secret()
    }

    /// Get the session token, if any.
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_ref().map(|s| s.expose_secret().as_str())
    }

    /// Get the expiration time, if any.
    pub fn expiration(&self) -> Option<&DateTime<Utc>> {
        self.expiration.as_ref()
    }

    /// Check if credentials have expired.
    pub fn is_expired(&self) -> bool {
        match &self.expiration {
            Some(exp) => Utc::now() >= *exp,
            None => false,
        }
    }

    /// Check if credentials will expire within the given duration.
    pub fn will_expire_within(&self, duration: chrono::Duration) -> bool {
        match &self.expiration {
            Some(exp) => Utc::now() + duration >= *exp,
            None => false,
        }
    }

    /// Check if credentials are temporary (have a session token).
    pub fn is_temporary(&self) -> bool {
        self.session_token.is_some()
    }

    /// Fail with [`CredentialsError::Expired`] if past expiration.
    pub fn ensure_valid(&self) -> Result<(), CredentialsError> {
        if self.is_expired() {
            return Err(CredentialsError::Expired {
                expiration: self
                    .expiration
                    .map(|e| e.to_rfc3339())
                    .unwrap_or_default(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// Source of ambient credentials.
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Get credentials from this provider.
    async fn get_credentials(&self) -> Result<Credentials, CredentialsError>;

    /// Provider name for logging/debugging.
    fn name(&self) -> &'static str;
}

/// Static credentials provider for testing or explicit configuration.
pub struct StaticCredentialsProvider {
    credentials: Credentials,
}

impl StaticCredentialsProvider {
    /// Create a new static credentials provider.
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl CredentialsProvider for StaticCredentialsProvider {
    async fn get_credentials(&self) -> Result<Credentials, CredentialsError> {
        self.credentials.ensure_valid()?;
        Ok(self.credentials.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

impl fmt::Debug for StaticCredentialsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentialsProvider")
            .field("credentials", &self.credentials)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credentials_new() {
        let creds = Credentials::new("AKID", "SECRET");
        assert_eq!(creds.access_key_id(), "AKID");
        assert_eq!(creds.secret_access_key(), "SECRET");
        assert!(creds.session_token().is_none());
        assert!(!creds.is_temporary());
        assert!(!creds.is_expired());
    }

    #[test]
    fn test_credentials_debug_redacts_secrets() {
        let creds = Credentials::with_session_token("AKID", "SECRET", "TOKEN");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("AKID"));
        assert!(!debug.contains("SECRET"));
        assert!(!debug.contains("TOKEN"));
    }

    #[test]
    fn test_expiration() {
        let past = Utc::now() - chrono::Duration::minutes(1);
        let expired = Credentials::temporary("AKID", "SECRET", "TOKEN", past);
        assert!(expired.is_expired());
        assert!(matches!(
            expired.ensure_valid(),
            Err(CredentialsError::Expired { .. })
        ));

        let soon = Utc::now() + chrono::Duration::minutes(2);
        let fresh = Credentials::temporary("AKID", "SECRET", "TOKEN", soon);
        assert!(!fresh.is_expired());
        assert!(fresh.will_expire_within(chrono::Duration::minutes(5)));
        assert!(!fresh.will_expire_within(chrono::Duration::seconds(10)));
    }

    #[test]
    fn test_from_wire() {
        let map = json!({
            "AccessKeyId": "ASIATEMP",
            "SecretAccessKey": "secret",
            "SessionToken": "token",
            "Expiration": "2030-01-01T00:00:00Z"
        });
        let creds = Credentials::from_wire(map.as_object().unwrap()).unwrap();
        assert_eq!(creds.access_key_id(), "ASIATEMP");
        assert_eq!(creds.session_token(), Some("token"));
        assert_eq!(creds.expiration().unwrap().to_rfc3339(), "2030-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_from_wire_missing_key() {
        let map = json!({"SecretAccessKey": "secret"});
        assert!(matches!(
            Credentials::from_wire(map.as_object().unwrap()),
            Err(DecodeError::MissingField { .. })
        ));
    }

    #[test]
    fn test_from_wire_requires_expiration() {
        let map = json!({"AccessKeyId": "ASIATEMP", "SecretAccessKey": "secret", "SessionToken": "token"});
        let err = Credentials::from_wire(map.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { ref field } if field == "Expiration"));
    }

    #[tokio::test]
    async fn test_static_provider_rejects_expired() {
        let past = Utc::now() - chrono::Duration::hours(1);
        let provider =
            StaticCredentialsProvider::new(Credentials::temporary("A", "B", "C", past));
        assert!(provider.get_credentials().await.is_err());
        assert_eq!(provider.name(), "static");
    }
}
