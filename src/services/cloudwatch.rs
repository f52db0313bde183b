//! CloudWatch metrics facade.

use super::Binding;
use crate::client::ClientSource;
use crate::error::{BoxError, FacadeResult};
use crate::guard::guard;
use crate::types::cloudwatch::{MetricStatistics, MetricStatisticsInput};
use crate::types::FromWire;
use crate::wire;

const SERVICE: &str = "cloudwatch";

/// Service for CloudWatch metric queries.
#[derive(Debug, Clone, Default)]
pub struct CloudWatchService {
    binding: Binding,
}

impl CloudWatchService {
    /// Create a new CloudWatch service.
    pub fn new(source: impl Into<ClientSource>) -> Self {
        Self {
            binding: Binding::new(source.into()),
        }
    }

    /// Statistics for one metric over a time window.
    pub async fn get_metric_statistics(
        &self,
        input: &MetricStatisticsInput,
    ) -> FacadeResult<MetricStatistics> {
        guard(crate::operation!("get_metric_statistics"), async {
            let client = self.binding.client(SERVICE).await?;
            let response = client
                .invoke("GetMetricStatistics", wire::encode(input)?)
                .await?;
            Ok::<_, BoxError>(MetricStatistics::from_wire(&response)?)
        })
        .await
    }
}
