//! Service Catalog facade.

use super::Binding;
use crate::client::ClientSource;
use crate::error::FacadeResult;
use crate::guard::guard;
use crate::pagination::{OperationPaginator, TokenSpec};
use crate::types::servicecatalog::{
    ProductSummary, ProvisionedProduct, ProvisionedProductRef, RecordOutput,
};
use crate::types::FromWire;
use crate::wire::{self, WireMap};

const SERVICE: &str = "servicecatalog";

const PAGE_TOKEN: TokenSpec = TokenSpec::new("PageToken", "NextPageToken");

/// Service for Service Catalog queries.
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalogService {
    binding: Binding,
}

impl ServiceCatalogService {
    /// Create a new Service Catalog service.
    pub fn new(source: impl Into<ClientSource>) -> Self {
        Self {
            binding: Binding::new(source.into()),
        }
    }

    /// Outputs of one provisioned product.
    pub async fn get_provisioned_product_outputs(
        &self,
        product: &ProvisionedProductRef,
    ) -> FacadeResult<Vec<RecordOutput>> {
        guard(crate::operation!("get_provisioned_product_outputs"), async {
            let client = self.binding.client(SERVICE).await?;
            let params = match product {
                ProvisionedProductRef::Id(id) => {
                    wire::params([("ProvisionedProductId", Some(id.as_str().into()))])
                }
                ProvisionedProductRef::Name(name) => {
                    wire::params([("ProvisionedProductName", Some(name.as_str().into()))])
                }
            };
            OperationPaginator::new(&client, "GetProvisionedProductOutputs", params, PAGE_TOKEN)
                .collect("Outputs", RecordOutput::from_wire)
                .await
        })
        .await
    }

    /// Every provisioned product visible to the caller.
    pub async fn scan_provisioned_products(&self) -> FacadeResult<Vec<ProvisionedProduct>> {
        guard(crate::operation!("scan_provisioned_products"), async {
            let client = self.binding.client(SERVICE).await?;
            OperationPaginator::new(&client, "ScanProvisionedProducts", WireMap::new(), PAGE_TOKEN)
                .collect("ProvisionedProducts", ProvisionedProduct::from_wire)
                .await
        })
        .await
    }

    /// Every product the caller can launch.
    pub async fn search_products(&self) -> FacadeResult<Vec<ProductSummary>> {
        guard(crate::operation!("search_products"), async {
            let client = self.binding.client(SERVICE).await?;
            OperationPaginator::new(&client, "SearchProducts", WireMap::new(), PAGE_TOKEN)
                .collect("ProductViewSummaries", ProductSummary::from_wire)
                .await
        })
        .await
    }

    /// Every provisioned product, through the search API.
    pub async fn search_provisioned_products(&self) -> FacadeResult<Vec<ProvisionedProduct>> {
        guard(crate::operation!("search_provisioned_products"), async {
            let client = self.binding.client(SERVICE).await?;
            OperationPaginator::new(&client, "SearchProvisionedProducts", WireMap::new(), PAGE_TOKEN)
                .collect("ProvisionedProducts", ProvisionedProduct::from_wire)
                .await
        })
        .await
    }
}
