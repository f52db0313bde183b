//! CloudWatch metric records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A metric dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dimension {
    /// Dimension name.
    pub name: String,
    /// Dimension value.
    pub value: String,
}

impl Dimension {
    /// Create a dimension.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Input of `get_metric_statistics`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricStatisticsInput {
    /// Metric namespace, e.g. `AWS/EC2`.
    pub namespace: String,
    /// Metric name.
    pub metric_name: String,
    /// Dimensions identifying the metric.
    pub dimensions: Vec<Dimension>,
    /// Start of the window (inclusive).
    pub start_time: DateTime<Utc>,
    /// End of the window (exclusive).
    pub end_time: DateTime<Utc>,
    /// Granularity in seconds.
    pub period: u32,
    /// Statistics to return, e.g. `Average`, `Maximum`.
    pub statistics: Vec<String>,
}

/// One aggregated datapoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Datapoint {
    /// Start of the period this datapoint covers.
    #[serde(default, deserialize_with = "crate::wire::timestamp::optional")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Number of samples.
    pub sample_count: Option<f64>,
    /// Average value.
    pub average: Option<f64>,
    /// Sum of values.
    pub sum: Option<f64>,
    /// Minimum value.
    pub minimum: Option<f64>,
    /// Maximum value.
    pub maximum: Option<f64>,
    /// Unit of the statistic.
    pub unit: Option<String>,
}

/// Output of `get_metric_statistics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricStatistics {
    /// Metric label.
    #[serde(default)]
    pub label: Option<String>,
    /// Datapoints, in the order the service returned them.
    #[serde(default)]
    pub datapoints: Vec<Datapoint>,
}

serde_from_wire!(MetricStatistics);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FromWire;
    use crate::wire;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_input_encodes_timestamps() {
        let input = MetricStatisticsInput {
            namespace: "AWS/EC2".into(),
            metric_name: "CPUUtilization".into(),
            dimensions: vec![Dimension::new("InstanceId", "i-1")],
            start_time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            period: 3600,
            statistics: vec!["Average".into()],
        };
        let map = wire::encode(&input).unwrap();
        assert_eq!(map["StartTime"], json!("2024-01-01T00:00:00Z"));
        assert_eq!(map["Dimensions"][0]["Name"], json!("InstanceId"));
    }

    #[test]
    fn test_output_epoch_timestamps() {
        let map = json!({
            "Label": "CPUUtilization",
            "Datapoints": [{"Timestamp": 1704067200.0, "Average": 12.5, "Unit": "Percent"}]
        });
        let stats = MetricStatistics::from_wire(map.as_object().unwrap()).unwrap();
        assert_eq!(stats.datapoints.len(), 1);
        assert_eq!(
            stats.datapoints[0].timestamp,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(stats.datapoints[0].maximum, None);
    }
}
