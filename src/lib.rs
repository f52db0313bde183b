//! AWS Service Facade
//!
//! Typed, uniform access to a set of AWS services on top of a pluggable
//! provider client.
//!
//! # Features
//!
//! - **Uniform Errors**: Every operation fails with a [`FacadeError`] of one of
//!   four kinds, naming the operation that failed
//! - **Page Aggregation**: Listing operations drain every page and combine
//!   per-page metadata
//! - **Role Delegation**: Assume roles, chain them and build clients from the
//!   temporary credentials
//! - **Default Session**: One process-wide region, identity and client cache
//! - **Waiters**: Poll an operation until a model-defined condition holds
//! - **Testing**: Scripted clients and factories in [`mocks`]
//!
//! The facade does not sign or send requests. Supply a [`ClientFactory`] that
//! builds [`ProviderClient`]s for your transport.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use aws_facade::{install_default_session, AwsFacade, ClientFactory, Session};
//! use std::sync::Arc;
//!
//! # async fn run(factory: Arc<dyn ClientFactory>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! // Region and credentials come from the environment
//! install_default_session(Session::from_env(factory)?)?;
//!
//! let facade = AwsFacade::new();
//! let output = facade.dynamodb().scan("orders", None, None).await?;
//! println!("{} items, {} scanned", output.count, output.scanned_count);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod broker;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod facade;
pub mod guard;
pub mod mocks;
pub mod pagination;
pub mod services;
pub mod session;
pub mod types;
pub mod waiter;
pub mod wire;

// Re-export main types at crate root
pub use broker::CredentialBroker;
pub use client::{ClientFactory, ClientHandle, ClientSource, ClientSpec, Delegation, ProviderClient};
pub use config::{ClientConfig, RetryConfig, RetryMode, SessionConfig, DEFAULT_REGION};
pub use credentials::{
    ChainCredentialsProvider, Credentials, CredentialsProvider, EnvCredentialsProvider,
    ProfileCredentialsProvider, StaticCredentialsProvider,
};
pub use error::{
    CredentialsError, DecodeError, ErrorKind, FacadeError, FacadeResult, NetworkError,
    ProviderError, SessionError, WaiterError,
};
pub use facade::AwsFacade;
pub use guard::{guard, guard_sync, guarded, Operation};
pub use pagination::{AggregatedResult, OperationPaginator, Page, TokenSpec};
pub use services::{
    CloudFormationService, CloudWatchService, DynamoDbService, Ec2Service, IamService,
    IdentityStoreService, LogsService, OrganizationsService, S3Service, SchedulerService,
    ServiceCatalogService, SesService, SqsService, SsmService, SsoAdminService, StsService,
};
pub use session::{default_session, install_default_session, Session};
pub use types::Tag;
pub use waiter::{create_waiter, Waiter, WaiterModel};
pub use wire::WireMap;

/// Result type for facade operations.
pub type Result<T> = FacadeResult<T>;
