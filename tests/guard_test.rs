//! Integration tests for failure classification.

use aws_facade::error::{
    BoxError, CredentialsError, DecodeError, ErrorKind, FacadeError, NetworkError, ProviderError,
    INVALID_CREDENTIALS_MESSAGE,
};
use aws_facade::guard::{guard, guard_sync, Operation};
use aws_facade::mocks::TestFixtures;
use std::io;
use std::time::Duration;
use test_case::test_case;

const OP: Operation = Operation::new("billing::reports", "export");

async fn fail_with(error: impl Into<BoxError>) -> FacadeError {
    let error = error.into();
    guard(OP, async move { Err::<(), _>(error) }).await.unwrap_err()
}

#[test_case(ProviderError::service("InvalidClientTokenId", "bad token"), ErrorKind::InvalidCredentials; "invalid token code")]
#[test_case(ProviderError::service("ExpiredToken", "expired"), ErrorKind::InvalidCredentials; "expired token code")]
#[test_case(ProviderError::Credentials(CredentialsError::NotFound), ErrorKind::InvalidCredentials; "no credentials")]
#[test_case(ProviderError::service("ValidationException", "bad input"), ErrorKind::ServiceFault; "service fault")]
#[test_case(ProviderError::Network(NetworkError::ConnectionReset), ErrorKind::Transport; "connection reset")]
#[test_case(ProviderError::Network(NetworkError::Timeout { duration: Duration::from_secs(5) }), ErrorKind::Transport; "timeout")]
#[test_case(ProviderError::Decode(DecodeError::MissingField { field: "Items".into() }), ErrorKind::Unknown; "decode failure")]
#[test_case(ProviderError::other("boom"), ErrorKind::Unknown; "other")]
#[tokio::test]
async fn test_provider_failures_map_to_one_kind(error: ProviderError, expected: ErrorKind) {
    let err = fail_with(error).await;
    assert_eq!(err.kind(), expected);
    assert_eq!(err.operation(), OP);
}

#[tokio::test]
async fn test_credential_failures_use_fixed_message() {
    let from_code = fail_with(TestFixtures::invalid_token_error()).await;
    let from_provider = fail_with(CredentialsError::NotFound).await;

    assert_eq!(from_code.message(), INVALID_CREDENTIALS_MESSAGE);
    assert_eq!(from_provider.message(), INVALID_CREDENTIALS_MESSAGE);
    assert!(!from_code.is_retryable());
}

#[tokio::test]
async fn test_service_fault_keeps_code_and_message() {
    let err = fail_with(
        ProviderError::service("ConditionalCheckFailedException", "The conditional request failed")
            .with_request_id("req-1")
            .with_status(400),
    )
    .await;

    assert_eq!(err.kind(), ErrorKind::ServiceFault);
    assert_eq!(err.message(), "ConditionalCheckFailedException: The conditional request failed");
    assert_eq!(err.error_code(), Some("ConditionalCheckFailedException"));
    assert_eq!(err.request_id(), Some("req-1"));
    assert_eq!(err.status_code(), Some(400));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_server_errors_are_retryable() {
    let err = fail_with(ProviderError::service("InternalError", "oops").with_status(503)).await;
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unrecognized_failure_names_operation() {
    let err = fail_with(io::Error::new(io::ErrorKind::Other, "disk on fire")).await;

    assert_eq!(err.kind(), ErrorKind::Unknown);
    assert_eq!(
        err.message(),
        "An error occurred in billing::reports::export: disk on fire"
    );
}

#[tokio::test]
async fn test_transport_io_errors() {
    let err = fail_with(io::Error::new(io::ErrorKind::ConnectionRefused, "refused")).await;
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_nested_facade_error_keeps_kind() {
    let inner = fail_with(ProviderError::service("AccessDenied", "nope")).await;
    let outer_op = Operation::new("billing", "run");
    let outer = guard(outer_op, async move { Err::<(), _>(inner) })
        .await
        .unwrap_err();

    assert_eq!(outer.kind(), ErrorKind::ServiceFault);
    assert_eq!(outer.message(), "AccessDenied: nope");
    assert_eq!(outer.operation(), outer_op);
    assert_eq!(outer.error_code(), Some("AccessDenied"));
}

#[test]
fn test_context_prefix_skips_credential_errors() {
    let fault = guard_sync(OP, || Err::<(), _>(ProviderError::service("Oops", "bad"))).unwrap_err();
    assert_eq!(fault.with_context("while exporting").message(), "while exporting: Oops: bad");

    let creds = guard_sync(OP, || Err::<(), _>(CredentialsError::NotFound)).unwrap_err();
    assert_eq!(
        creds.with_context("while exporting").message(),
        INVALID_CREDENTIALS_MESSAGE
    );
}

#[tokio::test]
async fn test_elapsed_deadline_is_transport() {
    let elapsed = tokio::time::timeout(Duration::from_millis(1), std::future::pending::<()>())
        .await
        .unwrap_err();

    let err = fail_with(elapsed).await;
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_refused_http_connection_is_transport() {
    let refused = reqwest::Client::new()
        .get("http://127.0.0.1:1/")
        .send()
        .await
        .unwrap_err();
    assert!(refused.is_connect());

    let err = fail_with(refused).await;
    assert_eq!(err.kind(), ErrorKind::Transport);
}
