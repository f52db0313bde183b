//! Classification of underlying failures into the facade taxonomy.

use super::*;
use std::io;

/// Fixed guidance returned for every credential failure.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "AWS credentials are missing, invalid or not \
recognized. Supply credentials through the AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY and \
(for temporary credentials) AWS_SESSION_TOKEN environment variables, or configure a profile \
in ~/.aws/credentials and select it with AWS_PROFILE.";

/// Service codes meaning the caller's identity was not accepted.
const INVALID_CREDENTIAL_CODES: &[&str] = &[
    "UnrecognizedClientException",
    "InvalidClientTokenId",
    "InvalidAccessKeyId",
    "MissingAuthenticationToken",
    "IncompleteSignature",
    "SignatureDoesNotMatch",
    "ExpiredToken",
    "ExpiredTokenException",
    "InvalidToken",
];

const THROTTLING_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "ThrottledException",
    "RequestThrottled",
    "RequestThrottledException",
    "RequestLimitExceeded",
    "TooManyRequestsException",
    "ProvisionedThroughputExceededException",
    "SlowDown",
];

/// Returns true if `code` means the credentials were absent or unrecognized.
pub fn is_invalid_credentials_code(code: &str) -> bool {
    INVALID_CREDENTIAL_CODES.contains(&code)
}

/// Returns true if `code` is a throttling fault.
pub fn is_throttling_code(code: &str) -> bool {
    THROTTLING_CODES.contains(&code)
}

/// Classify an underlying failure raised by `operation`.
///
/// A failure that is already a [`FacadeError`] keeps its kind and message and
/// is re-attributed to `operation`, with the inner error kept as cause.
pub fn classify(operation: Operation, error: BoxError) -> FacadeError {
    if let Some(inner) = error.downcast_ref::<FacadeError>() {
        let kind = inner.kind();
        let message = inner.message().to_string();
        return FacadeError::new(kind, message, operation, Some(error));
    }

    let chain: &(dyn StdError + 'static) = &*error;
    let kind = classify_kind(chain);
    let message = match kind {
        ErrorKind::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
        ErrorKind::ServiceFault => {
            service_fault_message(chain).unwrap_or_else(|| error.to_string())
        }
        ErrorKind::Transport => error.to_string(),
        ErrorKind::Unknown => format!("An error occurred in {}: {}", operation, error),
    };

    FacadeError::new(kind, message, operation, Some(error))
}

/// Determine the kind of a failure by walking its `source()` chain.
///
/// The strongest match anywhere in the chain wins.
pub fn classify_kind(error: &(dyn StdError + 'static)) -> ErrorKind {
    let mut best = ErrorKind::Unknown;
    let mut current = Some(error);
    while let Some(err) = current {
        if let Some(kind) = classify_link(err) {
            if kind.priority() < best.priority() {
                best = kind;
            }
        }
        current = err.source();
    }
    best
}

fn classify_link(err: &(dyn StdError + 'static)) -> Option<ErrorKind> {
    if let Some(facade) = err.downcast_ref::<FacadeError>() {
        return Some(facade.kind());
    }

    if let Some(provider) = err.downcast_ref::<ProviderError>() {
        return match provider {
            ProviderError::Service { code, .. } if is_invalid_credentials_code(code) => {
                Some(ErrorKind::InvalidCredentials)
            }
            ProviderError::Service { .. } => Some(ErrorKind::ServiceFault),
            ProviderError::Credentials(_) => Some(ErrorKind::InvalidCredentials),
            ProviderError::Network(_) => Some(ErrorKind::Transport),
            ProviderError::Decode(_) | ProviderError::Other { .. } => None,
        };
    }

    if err.is::<CredentialsError>() {
        return Some(ErrorKind::InvalidCredentials);
    }

    if err.is::<NetworkError>() || err.is::<tokio::time::error::Elapsed>() {
        return Some(ErrorKind::Transport);
    }

    if let Some(io_err) = err.downcast_ref::<io::Error>() {
        return is_transport_io(io_err.kind()).then_some(ErrorKind::Transport);
    }

    if let Some(http) = err.downcast_ref::<reqwest::Error>() {
        return (http.is_connect() || http.is_timeout()).then_some(ErrorKind::Transport);
    }

    None
}

fn is_transport_io(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected
            | io::ErrorKind::AddrNotAvailable
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::TimedOut
    )
}

fn service_fault_message(error: &(dyn StdError + 'static)) -> Option<String> {
    let mut current = Some(error);
    while let Some(err) = current {
        if let Some(fault) = err.downcast_ref::<ProviderError>() {
            if matches!(fault, ProviderError::Service { .. }) {
                return Some(fault.to_string());
            }
        }
        current = err.source();
    }
    None
}
