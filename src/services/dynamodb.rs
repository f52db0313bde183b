//! DynamoDB facade.

use super::Binding;
use crate::client::ClientSource;
use crate::error::{BoxError, FacadeResult};
use crate::guard::guard;
use crate::pagination::{OperationPaginator, TokenSpec};
use crate::types::dynamodb::{Item, ScanMetadata, ScanOutput};
use crate::wire::{self, WireMap};
use serde_json::Value;

const SERVICE: &str = "dynamodb";

const SCAN_TOKENS: TokenSpec = TokenSpec::new("ExclusiveStartKey", "LastEvaluatedKey");

/// Service for DynamoDB table operations.
#[derive(Debug, Clone, Default)]
pub struct DynamoDbService {
    binding: Binding,
}

impl DynamoDbService {
    /// Create a new DynamoDB service.
    pub fn new(source: impl Into<ClientSource>) -> Self {
        Self {
            binding: Binding::new(source.into()),
        }
    }

    /// Scan a whole table.
    ///
    /// Items from every page are concatenated in order. `count` and
    /// `scanned_count` are summed over all pages; `last_evaluated_key` and
    /// `consumed_capacity` come from the final page. Expression values are
    /// only sent together with a filter expression.
    pub async fn scan(
        &self,
        table_name: &str,
        filter_expression: Option<&str>,
        expression_values: Option<&WireMap>,
    ) -> FacadeResult<ScanOutput> {
        guard(crate::operation!("scan"), async {
            let client = self.binding.client(SERVICE).await?;

            let mut params = wire::params([("TableName", Some(Value::from(table_name)))]);
            if let Some(filter) = filter_expression {
                params.insert("FilterExpression".to_string(), filter.into());
                if let Some(values) = expression_values {
                    params.insert(
                        "ExpressionAttributeValues".to_string(),
                        Value::Object(values.clone()),
                    );
                }
            }

            let result = OperationPaginator::new(&client, "Scan", params, SCAN_TOKENS)
                .aggregate(|page| {
                    let items: Vec<Item> = wire::records(page, "Items")?;
                    Ok((items, ScanMetadata::from_page(page)?))
                })
                .await?;

            Ok::<_, BoxError>(ScanOutput::new(result.items, result.metadata))
        })
        .await
    }
}
