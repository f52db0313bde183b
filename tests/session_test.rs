//! Integration tests for the process-wide default session.
//!
//! The default session can be installed once per process, so everything that
//! touches it lives in a single test.

use aws_facade::config::{ClientConfig, RetryConfig, RetryMode, SessionConfig};
use aws_facade::error::{ErrorKind, SessionError};
use aws_facade::mocks::{MockClientFactory, MockProviderClient, TestFixtures};
use aws_facade::services::{SsmService, StsService};
use aws_facade::{default_session, install_default_session, AwsFacade};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_default_session_lifecycle() {
    // Facades built before installation resolve lazily.
    let early = StsService::default();
    let err = early.get_caller_identity().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unknown);
    assert!(err.message().contains("No default session installed"));

    let mock = Arc::new(MockProviderClient::new());
    mock.set_response(
        "GetCallerIdentity",
        json!({"Account": "123456789012", "UserId": "AIDAEXAMPLE", "Arn": "arn:aws:iam::123456789012:user/ops"}),
    );
    mock.set_response("GetParameter", json!({"Parameter": {"Name": "/app/db", "Value": "secret", "Type": "SecureString"}}));
    let factory = Arc::new(MockClientFactory::with_client(mock.clone()));

    let config = SessionConfig::builder()
        .region("ap-southeast-2")
        .credentials(TestFixtures::credentials())
        .client_factory(factory.clone())
        .build()
        .unwrap();
    let installed = install_default_session(aws_facade::Session::new(config)).unwrap();
    assert_eq!(installed.region(), "ap-southeast-2");

    // Same facade, now bound.
    assert!(early.validate_credentials().await.unwrap());
    let identity = AwsFacade::new().sts().get_caller_identity().await.unwrap();
    assert_eq!(identity.account, "123456789012");

    // One default client per service and policy.
    let sts = factory.specs_for("sts");
    assert_eq!(sts.len(), 1);
    assert_eq!(sts[0].region, "ap-southeast-2");
    assert_eq!(sts[0].config, ClientConfig::default());

    // Parameter Store gets its own policy and so its own client.
    let parameter = SsmService::default().get_parameter("/app/db", true).await.unwrap();
    assert_eq!(parameter.value, "secret");
    let ssm = factory.specs_for("ssm");
    assert_eq!(ssm.len(), 1);
    assert_eq!(ssm[0].config.retry, RetryConfig::new(10, RetryMode::Standard));

    // No re-initialisation.
    let again = SessionConfig::builder()
        .region("us-west-2")
        .client_factory(factory.clone())
        .build()
        .unwrap();
    assert!(matches!(
        install_default_session(aws_facade::Session::new(again)),
        Err(SessionError::AlreadyInstalled)
    ));
    assert_eq!(default_session().unwrap().region(), "ap-southeast-2");
}
