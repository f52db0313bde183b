//! Service facades.
//!
//! One facade per provider service. Each facade holds a [`ClientSource`]
//! that is resolved on every call, so a facade built before the default
//! session is installed still works once it is. Every operation runs inside
//! the operation guard; listing operations drain all pages.

mod cloudformation;
mod cloudwatch;
mod dynamodb;
mod ec2;
mod iam;
mod identitystore;
mod logs;
mod organizations;
mod s3;
mod scheduler;
mod servicecatalog;
mod ses;
mod sqs;
mod ssm;
mod sso_admin;
mod sts;

pub use cloudformation::CloudFormationService;
pub use cloudwatch::CloudWatchService;
pub use dynamodb::DynamoDbService;
pub use ec2::Ec2Service;
pub use iam::IamService;
pub use identitystore::IdentityStoreService;
pub use logs::LogsService;
pub use organizations::OrganizationsService;
pub use s3::S3Service;
pub use scheduler::SchedulerService;
pub use servicecatalog::ServiceCatalogService;
pub use ses::SesService;
pub use sqs::{region_from_queue_url, SqsService};
pub use ssm::{SsmService, SSM_MAX_ATTEMPTS};
pub use sso_admin::SsoAdminService;
pub use sts::StsService;

use crate::client::{ClientHandle, ClientSource};
use crate::config::ClientConfig;
use crate::error::BoxError;

/// Where a facade's client comes from, plus an optional policy override.
#[derive(Debug, Clone, Default)]
pub(crate) struct Binding {
    source: ClientSource,
    config: Option<ClientConfig>,
}

impl Binding {
    pub(crate) fn new(source: ClientSource) -> Self {
        Self {
            source,
            config: None,
        }
    }

    pub(crate) fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub(crate) async fn client(&self, service: &str) -> Result<ClientHandle, BoxError> {
        self.source.resolve(service, self.config.as_ref()).await
    }
}
