//! Service Catalog records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A provisioned product, as scanned or searched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProvisionedProduct {
    /// Provisioned product ID.
    pub id: Option<String>,
    /// Name.
    pub name: Option<String>,
    /// `AVAILABLE`, `UNDER_CHANGE`, `TAINTED`, `ERROR` or `PLAN_IN_PROGRESS`.
    pub status: Option<String>,
    /// `CFN_STACK` or `CFN_STACKSET`.
    #[serde(rename = "Type")]
    pub product_type: Option<String>,
    /// Creation time.
    #[serde(deserialize_with = "crate::wire::timestamp::optional")]
    pub created_time: Option<DateTime<Utc>>,
}

/// A product view summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProductSummary {
    /// Product ID.
    pub product_id: Option<String>,
    /// Name.
    pub name: Option<String>,
    /// Owner.
    pub owner: Option<String>,
    /// `CLOUD_FORMATION_TEMPLATE` or `MARKETPLACE`.
    #[serde(rename = "Type")]
    pub product_type: Option<String>,
    /// Short description.
    pub short_description: Option<String>,
}

/// An output of a provisioned product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RecordOutput {
    /// Output key.
    pub output_key: Option<String>,
    /// Output value.
    pub output_value: Option<String>,
    /// Description.
    pub description: Option<String>,
}

serde_from_wire!(ProvisionedProduct, ProductSummary, RecordOutput);

/// Identifies a provisioned product by ID or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionedProductRef {
    /// By provisioned product ID.
    Id(String),
    /// By provisioned product name.
    Name(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FromWire;
    use serde_json::json;

    #[test]
    fn test_type_member_renamed() {
        let map = json!({"Id": "pp-1", "Name": "web", "Type": "CFN_STACK", "Status": "AVAILABLE"});
        let product = ProvisionedProduct::from_wire(map.as_object().unwrap()).unwrap();
        assert_eq!(product.product_type.as_deref(), Some("CFN_STACK"));
        assert_eq!(product.created_time, None);
    }
}
