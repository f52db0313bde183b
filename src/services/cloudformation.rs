//! CloudFormation facade.

use super::Binding;
use crate::client::ClientSource;
use crate::error::{BoxError, FacadeResult};
use crate::guard::guard;
use crate::pagination::{OperationPaginator, TokenSpec};
use crate::types::cloudformation::{CreateStackInput, Stack};
use crate::types::FromWire;
use crate::wire::{self, WireMap};

const SERVICE: &str = "cloudformation";

/// Service for CloudFormation stack operations.
#[derive(Debug, Clone, Default)]
pub struct CloudFormationService {
    binding: Binding,
}

impl CloudFormationService {
    /// Create a new CloudFormation service.
    pub fn new(source: impl Into<ClientSource>) -> Self {
        Self {
            binding: Binding::new(source.into()),
        }
    }

    /// Create a stack from a template URL.
    ///
    /// The returned stack carries the new stack ID and the requested name.
    pub async fn create_stack(&self, input: &CreateStackInput) -> FacadeResult<Stack> {
        guard(crate::operation!("create_stack"), async {
            let client = self.binding.client(SERVICE).await?;
            let response = client.invoke("CreateStack", wire::encode(input)?).await?;

            Ok::<_, BoxError>(Stack {
                stack_id: Some(wire::required_str(&response, "StackId")?),
                stack_name: Some(input.stack_name.clone()),
                ..Default::default()
            })
        })
        .await
    }

    /// Describe one stack, or every stack when `stack_name` is `None` or empty.
    pub async fn describe_stacks(&self, stack_name: Option<&str>) -> FacadeResult<Vec<Stack>> {
        guard(crate::operation!("describe_stacks"), async {
            let client = self.binding.client(SERVICE).await?;
            let stack_name = stack_name.filter(|name| !name.is_empty());
            let params = wire::params([("StackName", stack_name.map(Into::into))]);
            OperationPaginator::new(&client, "DescribeStacks", params, TokenSpec::NEXT_TOKEN)
                .collect("Stacks", Stack::from_wire)
                .await
        })
        .await
    }

    /// List stack summaries, optionally filtered by status.
    ///
    /// An empty filter lists every status.
    pub async fn list_stacks(&self, status_filter: Option<&[&str]>) -> FacadeResult<Vec<Stack>> {
        guard(crate::operation!("list_stacks"), async {
            let client = self.binding.client(SERVICE).await?;
            let mut params = WireMap::new();
            if let Some(statuses) = status_filter.filter(|s| !s.is_empty()) {
                params.insert("StackStatusFilter".to_string(), statuses.to_vec().into());
            }
            OperationPaginator::new(&client, "ListStacks", params, TokenSpec::NEXT_TOKEN)
                .collect("StackSummaries", Stack::from_wire)
                .await
        })
        .await
    }
}
