//! Retry policy handed to client factories.
//!
//! The facade never retries on its own. The policy travels with every
//! [`ClientSpec`](crate::client::ClientSpec) so the transport that builds the
//! client can apply it.

use std::fmt;
use std::str::FromStr;

/// Retry mode, as understood by the provider's transports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RetryMode {
    /// Legacy mode.
    Legacy,
    /// Standard mode with a retry quota.
    #[default]
    Standard,
    /// Standard mode plus client-side rate limiting.
    Adaptive,
}

impl RetryMode {
    /// Wire name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            RetryMode::Legacy => "legacy",
            RetryMode::Standard => "standard",
            RetryMode::Adaptive => "adaptive",
        }
    }
}

impl fmt::Display for RetryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown retry mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown retry mode '{0}': expected legacy, standard or adaptive")]
pub struct ParseRetryModeError(String);

impl FromStr for RetryMode {
    type Err = ParseRetryModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(RetryMode::Legacy),
            "standard" => Ok(RetryMode::Standard),
            "adaptive" => Ok(RetryMode::Adaptive),
            _ => Err(ParseRetryModeError(s.to_string())),
        }
    }
}

/// Configuration for retry behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,

    /// Retry mode.
    pub mode: RetryMode,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            mode: RetryMode::Standard,
        }
    }
}

impl RetryConfig {
    /// Create a retry configuration.
    pub fn new(max_attempts: u32, mode: RetryMode) -> Self {
        Self { max_attempts, mode }
    }

    /// A single attempt, no retries.
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            mode: RetryMode::Standard,
        }
    }
}
