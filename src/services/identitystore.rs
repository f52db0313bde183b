//! Identity Store facade.

use super::Binding;
use crate::client::ClientSource;
use crate::error::FacadeResult;
use crate::guard::guard;
use crate::pagination::{OperationPaginator, TokenSpec};
use crate::types::identitystore::Group;
use crate::types::FromWire;
use crate::wire;

const SERVICE: &str = "identitystore";

/// Service for Identity Store queries.
#[derive(Debug, Clone, Default)]
pub struct IdentityStoreService {
    binding: Binding,
}

impl IdentityStoreService {
    /// Create a new Identity Store service.
    pub fn new(source: impl Into<ClientSource>) -> Self {
        Self {
            binding: Binding::new(source.into()),
        }
    }

    /// Every group in an identity store.
    pub async fn list_groups(&self, identity_store_id: &str) -> FacadeResult<Vec<Group>> {
        guard(crate::operation!("list_groups"), async {
            let client = self.binding.client(SERVICE).await?;
            let params = wire::params([("IdentityStoreId", Some(identity_store_id.into()))]);
            OperationPaginator::new(&client, "ListGroups", params, TokenSpec::NEXT_TOKEN)
                .collect("Groups", Group::from_wire)
                .await
        })
        .await
    }
}
