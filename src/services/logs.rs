//! CloudWatch Logs facade.

use super::Binding;
use crate::client::ClientSource;
use crate::error::FacadeResult;
use crate::guard::guard;
use crate::pagination::{OperationPaginator, TokenSpec};
use crate::types::logs::{FilterLogEventsInput, LogEvent};
use crate::types::FromWire;

const SERVICE: &str = "logs";

const NEXT_TOKEN: TokenSpec = TokenSpec::new("nextToken", "nextToken");

/// Service for CloudWatch Logs queries.
#[derive(Debug, Clone, Default)]
pub struct LogsService {
    binding: Binding,
}

impl LogsService {
    /// Create a new CloudWatch Logs service.
    pub fn new(source: impl Into<ClientSource>) -> Self {
        Self {
            binding: Binding::new(source.into()),
        }
    }

    /// Every event in a log group matching the filter, in page order.
    pub async fn filter_log_events(&self, input: &FilterLogEventsInput) -> FacadeResult<Vec<LogEvent>> {
        guard(crate::operation!("filter_log_events"), async {
            let client = self.binding.client(SERVICE).await?;
            OperationPaginator::new(&client, "FilterLogEvents", input.to_params(), NEXT_TOKEN)
                .collect("events", LogEvent::from_wire)
                .await
        })
        .await
    }
}
