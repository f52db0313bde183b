//! IAM facade.

use super::Binding;
use crate::client::ClientSource;
use crate::error::{BoxError, FacadeResult};
use crate::guard::guard;
use crate::pagination::{OperationPaginator, TokenSpec};
use crate::types::iam::{ListEntitiesForPolicyInput, PolicyEntities};
use crate::types::FromWire;

const SERVICE: &str = "iam";

const MARKER: TokenSpec = TokenSpec::new("Marker", "Marker");

/// Service for IAM queries.
#[derive(Debug, Clone, Default)]
pub struct IamService {
    binding: Binding,
}

impl IamService {
    /// Create a new IAM service.
    pub fn new(source: impl Into<ClientSource>) -> Self {
        Self {
            binding: Binding::new(source.into()),
        }
    }

    /// Groups, users and roles a managed policy is attached to.
    ///
    /// Each of the three lists is the concatenation of that list over every
    /// page.
    pub async fn list_entities_for_policy(
        &self,
        input: &ListEntitiesForPolicyInput,
    ) -> FacadeResult<PolicyEntities> {
        guard(crate::operation!("list_entities_for_policy"), async {
            let client = self.binding.client(SERVICE).await?;
            let result = OperationPaginator::new(
                &client,
                "ListEntitiesForPolicy",
                input.to_params(),
                MARKER,
            )
            .aggregate(|page| Ok((Vec::<()>::new(), PolicyEntities::from_wire(page)?)))
            .await?;

            Ok::<_, BoxError>(result.metadata)
        })
        .await
    }
}
