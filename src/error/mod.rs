//! Error types for the AWS facade.
//!
//! Every facade operation returns [`FacadeError`], a single error type carrying
//! one of four [`ErrorKind`]s, the fully-qualified name of the operation that
//! failed, and the original failure as its source. The remaining enums in this
//! module are the vocabulary provider clients, credential providers and wire
//! decoders use to describe *underlying* failures before classification.

mod mapping;

pub use mapping::{
    classify, classify_kind, is_invalid_credentials_code, is_throttling_code,
    INVALID_CREDENTIALS_MESSAGE,
};

use crate::guard::Operation;
use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Boxed underlying failure, as accepted by the guard.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result type for facade operations.
pub type FacadeResult<T> = std::result::Result<T, FacadeError>;

/// Classification of a facade failure, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller identity is absent, malformed or not recognized.
    InvalidCredentials,
    /// The service answered with a structured fault.
    ServiceFault,
    /// Network or transport level failure with no service fault attached.
    Transport,
    /// Anything else.
    Unknown,
}

impl ErrorKind {
    /// Lower is stronger. Used when several links of a cause chain match.
    pub(crate) fn priority(self) -> u8 {
        match self {
            ErrorKind::InvalidCredentials => 0,
            ErrorKind::ServiceFault => 1,
            ErrorKind::Transport => 2,
            ErrorKind::Unknown => 3,
        }
    }

    /// Stable name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidCredentials => "InvalidCredentials",
            ErrorKind::ServiceFault => "ServiceFault",
            ErrorKind::Transport => "Transport",
            ErrorKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only error type that crosses the facade boundary.
#[derive(Debug, Error)]
#[error("{kind} in {operation}: {message}")]
pub struct FacadeError {
    kind: ErrorKind,
    message: String,
    operation: Operation,
    #[source]
    source: Option<BoxError>,
}

impl FacadeError {
    /// Create an error directly, bypassing classification.
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        operation: Operation,
        source: Option<BoxError>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            operation,
            source,
        }
    }

    /// The error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The operation that produced this error.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The original failure, if one was attached.
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    /// Structured service error code carried anywhere in the cause chain.
    pub fn error_code(&self) -> Option<&str> {
        match self.service_fault()? {
            ProviderError::Service { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Request ID reported by the service, if any.
    pub fn request_id(&self) -> Option<&str> {
        match self.service_fault()? {
            ProviderError::Service { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }

    /// HTTP status reported by the service, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self.service_fault()? {
            ProviderError::Service { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns true if a retry might succeed.
    ///
    /// Advisory only: the facade itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self.kind {
            ErrorKind::Transport => true,
            ErrorKind::ServiceFault => {
                self.error_code().is_some_and(is_throttling_code)
                    || self.status_code().is_some_and(|status| status >= 500)
            }
            ErrorKind::InvalidCredentials | ErrorKind::Unknown => false,
        }
    }

    /// Prefix the message with call-site context.
    ///
    /// Credential errors keep their fixed guidance text.
    pub fn with_context(mut self, context: impl fmt::Display) -> Self {
        if self.kind != ErrorKind::InvalidCredentials {
            self.message = format!("{}: {}", context, self.message);
        }
        self
    }

    fn service_fault(&self) -> Option<&ProviderError> {
        let mut current: Option<&(dyn StdError + 'static)> =
            self.source.as_deref().map(|e| e as &(dyn StdError + 'static));
        while let Some(err) = current {
            if let Some(fault) = err.downcast_ref::<ProviderError>() {
                if matches!(fault, ProviderError::Service { .. }) {
                    return Some(fault);
                }
            }
            current = err.source();
        }
        None
    }
}

/// Failures reported by a provider client.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Structured fault returned by the service.
    #[error("{code}: {message}")]
    Service {
        /// Service error code (e.g. "ResourceNotFoundException").
        code: String,
        /// Service error message.
        message: String,
        /// AWS request ID.
        request_id: Option<String>,
        /// HTTP status code.
        status: Option<u16>,
    },

    /// Network and transport errors.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Credential errors raised while building or signing a request.
    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    /// The response could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Anything else the client could not describe more precisely.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl ProviderError {
    /// Create a service fault.
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        ProviderError::Service {
            code: code.into(),
            message: message.into(),
            request_id: None,
            status: None,
        }
    }

    /// Create an unstructured failure.
    pub fn other(message: impl Into<String>) -> Self {
        ProviderError::Other {
            message: message.into(),
        }
    }

    /// Attach a request ID to a service fault.
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        if let ProviderError::Service { request_id, .. } = &mut self {
            *request_id = Some(id.into());
        }
        self
    }

    /// Attach an HTTP status to a service fault.
    pub fn with_status(mut self, code: u16) -> Self {
        if let ProviderError::Service { status, .. } = &mut self {
            *status = Some(code);
        }
        self
    }

    /// The service error code, if this is a service fault.
    pub fn code(&self) -> Option<&str> {
        match self {
            ProviderError::Service { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Network and transport errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Connection failed.
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Error message.
        message: String,
    },

    /// Request timed out.
    #[error("Request timed out after {duration:?}")]
    Timeout {
        /// The timeout duration.
        duration: Duration,
    },

    /// DNS resolution failed.
    #[error("DNS resolution failed for '{host}'")]
    DnsResolutionFailed {
        /// The host that could not be resolved.
        host: String,
    },

    /// Connection reset.
    #[error("Connection reset by peer")]
    ConnectionReset,

    /// TLS/SSL error.
    #[error("TLS error: {message}")]
    Tls {
        /// Error message.
        message: String,
    },
}

/// Credential-related errors.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// No credentials could be found.
    #[error("Credentials not found: no credentials could be loaded from any source")]
    NotFound,

    /// Credentials have expired.
    #[error("Credentials expired: session credentials expired at {expiration}")]
    Expired {
        /// When the credentials expired.
        expiration: String,
    },

    /// Credentials are invalid.
    #[error("Invalid credentials: {message}")]
    Invalid {
        /// Details about why credentials are invalid.
        message: String,
    },

    /// Profile configuration error.
    #[error("Profile error: {message}")]
    ProfileError {
        /// Details about the profile error.
        message: String,
    },
}

/// Errors decoding wire-format maps into typed records.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A required field is absent or null.
    #[error("Missing required field '{field}' in response")]
    MissingField {
        /// The missing field name.
        field: String,
    },

    /// A field is present but has the wrong shape.
    #[error("Invalid field '{field}': expected {expected}")]
    InvalidField {
        /// The field name.
        field: String,
        /// What was expected.
        expected: String,
    },

    /// serde could not map the value.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DecodeError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        DecodeError::MissingField {
            field: field.into(),
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, expected: impl Into<String>) -> Self {
        DecodeError::InvalidField {
            field: field.into(),
            expected: expected.into(),
        }
    }
}

/// Errors from session configuration and the process-wide default.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No default session was installed.
    #[error("No default session installed: call install_default_session first or pass a client explicitly")]
    NotInstalled,

    /// A default session is already installed.
    #[error("A default session is already installed; start a new process to change ambient identity")]
    AlreadyInstalled,

    /// The configured region is empty.
    #[error("Missing region: region must not be empty")]
    MissingRegion,

    /// No client factory was configured.
    #[error("Missing client factory: a ClientFactory must be supplied to build service clients")]
    MissingClientFactory,
}

/// Errors raised by waiters.
#[derive(Debug, Error)]
pub enum WaiterError {
    /// The model does not define the requested waiter.
    #[error("Waiter '{name}' is not defined in the waiter model")]
    UnknownWaiter {
        /// Waiter name.
        name: String,
    },

    /// The waiter definition is malformed.
    #[error("Invalid waiter configuration: {message}")]
    InvalidConfig {
        /// Details.
        message: String,
    },

    /// A failure acceptor matched.
    #[error("Waiter {name} failed: {reason}")]
    FailureState {
        /// Waiter name.
        name: String,
        /// Which acceptor matched.
        reason: String,
    },

    /// Attempts were exhausted without reaching a terminal state.
    #[error("Waiter {name} failed: max attempts ({attempts}) exceeded")]
    MaxAttemptsExceeded {
        /// Waiter name.
        name: String,
        /// Attempts made.
        attempts: u32,
    },
}
