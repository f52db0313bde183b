//! Shared credentials file provider.

use super::{Credentials, CredentialsProvider};
use crate::error::CredentialsError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::{env, fs};

/// Default profile name.
pub const DEFAULT_PROFILE: &str = "default";

/// AWS profile name environment variable.
pub const AWS_PROFILE: &str = "AWS_PROFILE";

/// AWS credentials file environment variable.
pub const AWS_SHARED_CREDENTIALS_FILE: &str = "AWS_SHARED_CREDENTIALS_FILE";

type Profiles = HashMap<String, HashMap<String, String>>;

/// Credentials provider that reads `~/.aws/credentials`.
///
/// The file is `AWS_SHARED_CREDENTIALS_FILE` when set. The profile is the
/// constructor argument, then `AWS_PROFILE`, then `default`.
#[derive(Debug, Clone)]
pub struct ProfileCredentialsProvider {
    profile_name: String,
    credentials_file: Option<PathBuf>,
}

impl ProfileCredentialsProvider {
    /// Create a new provider using `AWS_PROFILE` or the default profile.
    pub fn new() -> Self {
        let profile = env::var(AWS_PROFILE).unwrap_or_else(|_| DEFAULT_PROFILE.to_string());
        Self::with_profile(profile)
    }

    /// Create a provider for a specific profile.
    pub fn with_profile(profile_name: impl Into<String>) -> Self {
        Self {
            profile_name: profile_name.into(),
            credentials_file: None,
        }
    }

    /// Read from a specific credentials file.
    pub fn with_credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    /// The profile this provider reads.
    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    fn credentials_file_path(&self) -> Result<PathBuf, CredentialsError> {
        if let Some(path) = &self.credentials_file {
            return Ok(path.clone());
        }

        if let Ok(path) = env::var(AWS_SHARED_CREDENTIALS_FILE) {
            return Ok(PathBuf::from(path));
        }

        dirs::home_dir()
            .map(|home| home.join(".aws").join("credentials"))
            .ok_or_else(|| CredentialsError::ProfileError {
                message: "Cannot locate home directory for ~/.aws/credentials".to_string(),
            })
    }

    fn parse_credentials_file(content: &str) -> Profiles {
        let mut profiles = Profiles::new();
        let mut current_profile: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let header = header.trim();
                let name = header.strip_prefix("profile ").unwrap_or(header).trim();
                profiles.entry(name.to_string()).or_default();
                current_profile = Some(name.to_string());
                continue;
            }

            if let (Some(profile), Some((key, value))) = (&current_profile, line.split_once('=')) {
                profiles
                    .entry(profile.clone())
                    .or_default()
                    .insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        profiles
    }

    fn profile_error(&self, what: &str) -> CredentialsError {
        CredentialsError::ProfileError {
            message: format!("{} not found in profile '{}'", what, self.profile_name),
        }
    }
}

impl Default for ProfileCredentialsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialsProvider for ProfileCredentialsProvider {
    async fn get_credentials(&self) -> Result<Credentials, CredentialsError> {
        let path = self.credentials_file_path()?;

        let content = fs::read_to_string(&path).map_err(|e| CredentialsError::ProfileError {
            message: format!("Failed to read credentials file at {:?}: {}", path, e),
        })?;

        let profiles = Self::parse_credentials_file(&content);
        let profile = profiles
            .get(&self.profile_name)
            .ok_or_else(|| CredentialsError::ProfileError {
                message: format!(
                    "Profile '{}' not found in credentials file",
                    self.profile_name
                ),
            })?;

        let access_key_id = profile
            .get("aws_access_key_id")
            .ok_or_else(|| self.profile_error("aws_access_key_id"))?;
        let secret_access_key = profile
            .get("aws_secret_access_key")
            .ok_or_else(|| self.profile_error("aws_secret_access_key"))?;

        Ok(match profile.get("aws_session_token") {
            Some(token) => Credentials::with_session_token(access_key_id, secret_access_key, token),
            None => Credentials::new(access_key_id, secret_access_key),
        })
    }

    fn name(&self) -> &'static str {
        "profile"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn credentials_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const TWO_PROFILES: &str = r#"
# comment
[default]
aws_access_key_id = AKIADEFAULT
aws_secret_access_key = secretdefault

; another comment
[profile production]
aws_access_key_id = AKIAPROD
aws_secret_access_key = secretprod
aws_session_token = tokenprod
"#;

    #[test]
    fn test_parse_credentials_file() {
        let profiles = ProfileCredentialsProvider::parse_credentials_file(TWO_PROFILES);
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles["default"]["aws_access_key_id"], "AKIADEFAULT");
        assert_eq!(profiles["production"]["aws_session_token"], "tokenprod");
    }

    #[tokio::test]
    async fn test_profile_provider_specific_profile() {
        let file = credentials_file(TWO_PROFILES);
        let provider =
            ProfileCredentialsProvider::with_profile("production").with_credentials_file(file.path());

        let creds = provider.get_credentials().await.unwrap();
        assert_eq!(creds.access_key_id(), "AKIAPROD");
        assert_eq!(creds.session_token(), Some("tokenprod"));
    }

    #[tokio::test]
    async fn test_profile_provider_missing_profile() {
        let file = credentials_file(TWO_PROFILES);
        let provider =
            ProfileCredentialsProvider::with_profile("staging").with_credentials_file(file.path());
        assert!(matches!(
            provider.get_credentials().await,
            Err(CredentialsError::ProfileError { .. })
        ));
    }

    #[tokio::test]
    async fn test_profile_provider_missing_secret() {
        let file = credentials_file("[default]\naws_access_key_id = AKIATEST\n");
        let provider =
            ProfileCredentialsProvider::with_profile("default").with_credentials_file(file.path());
        let err = provider.get_credentials().await.unwrap_err();
        assert!(err.to_string().contains("aws_secret_access_key"));
    }

    #[tokio::test]
    async fn test_profile_provider_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let provider = ProfileCredentialsProvider::with_profile("default")
            .with_credentials_file(dir.path().join("absent"));
        assert!(provider.get_credentials().await.is_err());
    }
}
