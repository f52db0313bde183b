//! Chain credentials provider that tries multiple sources.

use super::{Credentials, CredentialsProvider, EnvCredentialsProvider, ProfileCredentialsProvider};
use crate::error::CredentialsError;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Credentials provider that tries each provider in order until one succeeds.
///
/// The default chain is environment variables, then the shared credentials
/// file. Nothing is cached: every call walks the chain again.
pub struct ChainCredentialsProvider {
    providers: Vec<Arc<dyn CredentialsProvider>>,
}

impl ChainCredentialsProvider {
    /// Create a new chain with the default providers.
    pub fn new() -> Self {
        Self::with_providers(vec![
            Arc::new(EnvCredentialsProvider::new()),
            Arc::new(ProfileCredentialsProvider::new()),
        ])
    }

    /// Create a chain with custom providers.
    pub fn with_providers(providers: Vec<Arc<dyn CredentialsProvider>>) -> Self {
        Self { providers }
    }

    /// Add a provider to the end of the chain.
    pub fn add_provider(mut self, provider: Arc<dyn CredentialsProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Add a provider to the beginning of the chain.
    pub fn prepend_provider(mut self, provider: Arc<dyn CredentialsProvider>) -> Self {
        self.providers.insert(0, provider);
        self
    }
}

impl Default for ChainCredentialsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChainCredentialsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("ChainCredentialsProvider")
            .field("providers", &names)
            .finish()
    }
}

#[async_trait]
impl CredentialsProvider for ChainCredentialsProvider {
    async fn get_credentials(&self) -> Result<Credentials, CredentialsError> {
        let mut last_error = None;

        for provider in &self.providers {
            let name = provider.name();
            trace!(provider = name, "Trying credentials provider");

            match provider.get_credentials().await {
                Ok(creds) => {
                    debug!(provider = name, "Credentials loaded");
                    return Ok(creds);
                }
                Err(e) => {
                    trace!(provider = name, error = %e, "Credentials provider failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(CredentialsError::NotFound))
    }

    fn name(&self) -> &'static str {
        "chain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockCredentialsProvider;

    #[tokio::test]
    async fn test_chain_uses_first_success() {
        let failing = Arc::new(MockCredentialsProvider::failing());
        let working = Arc::new(MockCredentialsProvider::new(Credentials::new("AKID", "SECRET")));
        let providers: Vec<Arc<dyn CredentialsProvider>> = vec![failing.clone(), working.clone()];
        let chain = ChainCredentialsProvider::with_providers(providers);

        let creds = chain.get_credentials().await.unwrap();
        assert_eq!(creds.access_key_id(), "AKID");
        assert_eq!(failing.call_count(), 1);
        assert_eq!(working.call_count(), 1);
    }

    #[tokio::test]
    async fn test_chain_does_not_cache() {
        let working = Arc::new(MockCredentialsProvider::new(Credentials::new("AKID", "SECRET")));
        let providers: Vec<Arc<dyn CredentialsProvider>> = vec![working.clone()];
        let chain = ChainCredentialsProvider::with_providers(providers);

        chain.get_credentials().await.unwrap();
        chain.get_credentials().await.unwrap();
        assert_eq!(working.call_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_chain_not_found() {
        let chain = ChainCredentialsProvider::with_providers(vec![]);
        assert!(matches!(
            chain.get_credentials().await,
            Err(CredentialsError::NotFound)
        ));
    }

    #[test]
    fn test_debug_lists_provider_names() {
        let chain = ChainCredentialsProvider::new();
        assert_eq!(
            format!("{:?}", chain),
            "ChainCredentialsProvider { providers: [\"environment\", \"profile\"] }"
        );
    }
}
