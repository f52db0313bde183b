//! DynamoDB records.

use crate::error::DecodeError;
use crate::pagination::{LastPage, PageMetadata, Summed};
use crate::wire::{self, WireMap};
use serde_json::Value;

/// An item in DynamoDB's attribute-value encoding.
pub type Item = WireMap;

/// Scalars reported with each scan page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanMetadata {
    /// Items matching the filter.
    pub count: Summed<u64>,
    /// Items evaluated before filtering.
    pub scanned_count: Summed<u64>,
    /// Key to resume from.
    pub last_evaluated_key: LastPage<Item>,
    /// Capacity report.
    pub consumed_capacity: LastPage<Value>,
}

impl ScanMetadata {
    /// Read the metadata of one scan response.
    pub fn from_page(map: &WireMap) -> Result<Self, DecodeError> {
        Ok(Self {
            count: Summed(wire::optional_u64(map, "Count")?.unwrap_or(0)),
            scanned_count: Summed(wire::optional_u64(map, "ScannedCount")?.unwrap_or(0)),
            last_evaluated_key: LastPage(wire::optional_map(map, "LastEvaluatedKey")?),
            consumed_capacity: LastPage(map.get("ConsumedCapacity").filter(|v| !v.is_null()).cloned()),
        })
    }
}

impl PageMetadata for ScanMetadata {
    fn absorb(&mut self, next: Self) {
        self.count.absorb(next.count);
        self.scanned_count.absorb(next.scanned_count);
        self.last_evaluated_key.absorb(next.last_evaluated_key);
        self.consumed_capacity.absorb(next.consumed_capacity);
    }
}

/// A complete table scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutput {
    /// Every item, in page-then-position order.
    pub items: Vec<Item>,
    /// Sum of `Count` over all pages.
    pub count: u64,
    /// Sum of `ScannedCount` over all pages.
    pub scanned_count: u64,
    /// `LastEvaluatedKey` of the final page. Always `None` for a drained scan.
    pub last_evaluated_key: Option<Item>,
    /// `ConsumedCapacity` of the final page.
    pub consumed_capacity: Option<Value>,
}

impl ScanOutput {
    /// Assemble the output from the aggregated items and metadata.
    pub fn new(items: Vec<Item>, metadata: ScanMetadata) -> Self {
        Self {
            items,
            count: metadata.count.get(),
            scanned_count: metadata.scanned_count.get(),
            last_evaluated_key: metadata.last_evaluated_key.into_inner(),
            consumed_capacity: metadata.consumed_capacity.into_inner(),
        }
    }
}
