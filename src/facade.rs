//! Single entry point to every service facade.

use crate::broker::CredentialBroker;
use crate::client::{ClientHandle, ClientSource};
use crate::error::FacadeResult;
use crate::services::{
    CloudFormationService, CloudWatchService, DynamoDbService, Ec2Service, IamService,
    IdentityStoreService, LogsService, OrganizationsService, S3Service, SchedulerService,
    ServiceCatalogService, SesService, SqsService, SsmService, SsoAdminService, StsService,
};
use crate::session::Session;
use std::sync::Arc;

/// Hands out service facades that share one client source.
///
/// A facade built from the default source resolves the process-wide default
/// session on every call. One built with [`AwsFacade::as_role`] builds a
/// fresh client per call from delegated credentials.
#[derive(Debug, Clone, Default)]
pub struct AwsFacade {
    source: ClientSource,
}

impl AwsFacade {
    /// Facades on the process-wide default session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Facades on an explicit session.
    pub fn with_session(session: Arc<Session>) -> Self {
        Self::from_source(session)
    }

    /// Facades on any client source.
    pub fn from_source(source: impl Into<ClientSource>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Facades acting as `role_arn`.
    ///
    /// The role is assumed once, here. Expired delegated credentials are
    /// reported by the first call after they lapse.
    pub async fn as_role(
        broker: &CredentialBroker,
        role_arn: &str,
        region: Option<&str>,
    ) -> FacadeResult<Self> {
        let delegation = broker.delegation(role_arn, region).await?;
        Ok(Self::from_source(delegation))
    }

    /// The client source every facade uses.
    pub fn source(&self) -> &ClientSource {
        &self.source
    }

    /// CloudFormation.
    pub fn cloudformation(&self) -> CloudFormationService {
        CloudFormationService::new(self.source.clone())
    }

    /// CloudWatch metrics.
    pub fn cloudwatch(&self) -> CloudWatchService {
        CloudWatchService::new(self.source.clone())
    }

    /// DynamoDB.
    pub fn dynamodb(&self) -> DynamoDbService {
        DynamoDbService::new(self.source.clone())
    }

    /// EC2.
    pub fn ec2(&self) -> Ec2Service {
        Ec2Service::new(self.source.clone())
    }

    /// IAM.
    pub fn iam(&self) -> IamService {
        IamService::new(self.source.clone())
    }

    /// Identity Store.
    pub fn identitystore(&self) -> IdentityStoreService {
        IdentityStoreService::new(self.source.clone())
    }

    /// CloudWatch Logs.
    pub fn logs(&self) -> LogsService {
        LogsService::new(self.source.clone())
    }

    /// Organizations.
    pub fn organizations(&self) -> OrganizationsService {
        OrganizationsService::new(self.source.clone())
    }

    /// S3.
    pub fn s3(&self) -> S3Service {
        S3Service::new(self.source.clone())
    }

    /// EventBridge Scheduler.
    pub fn scheduler(&self) -> SchedulerService {
        SchedulerService::new(self.source.clone())
    }

    /// Service Catalog.
    pub fn servicecatalog(&self) -> ServiceCatalogService {
        ServiceCatalogService::new(self.source.clone())
    }

    /// SES.
    pub fn ses(&self) -> SesService {
        SesService::new(self.source.clone())
    }

    /// SQS.
    pub fn sqs(&self) -> SqsService {
        SqsService::new(self.source.clone())
    }

    /// SSM Parameter Store, with its longer retry policy.
    pub fn ssm(&self) -> SsmService {
        SsmService::new(self.source.clone())
    }

    /// IAM Identity Center administration.
    pub fn sso_admin(&self) -> SsoAdminService {
        SsoAdminService::new(self.source.clone())
    }

    /// STS.
    pub fn sts(&self) -> StsService {
        StsService::new(self.source.clone())
    }
}

impl From<ClientHandle> for AwsFacade {
    fn from(handle: ClientHandle) -> Self {
        Self::from_source(handle)
    }
}
