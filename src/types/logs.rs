//! CloudWatch Logs records.
//!
//! The logs API uses camelCase member names.

use crate::wire::{self, WireMap};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input of `filter_log_events`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterLogEventsInput {
    /// Log group name.
    pub log_group_name: String,
    /// Only search streams with this prefix.
    pub log_stream_name_prefix: Option<String>,
    /// Start of the window.
    pub start_time: Option<DateTime<Utc>>,
    /// End of the window.
    pub end_time: Option<DateTime<Utc>>,
    /// Filter pattern.
    pub filter_pattern: Option<String>,
    /// Maximum events per page.
    pub limit: Option<u32>,
}

impl FilterLogEventsInput {
    /// Search a whole log group.
    pub fn new(log_group_name: impl Into<String>) -> Self {
        Self {
            log_group_name: log_group_name.into(),
            ..Default::default()
        }
    }

    /// Times are sent as epoch milliseconds.
    pub(crate) fn to_params(&self) -> WireMap {
        wire::params([
            ("logGroupName", Some(self.log_group_name.clone().into())),
            (
                "logStreamNamePrefix",
                self.log_stream_name_prefix.clone().map(Into::into),
            ),
            ("startTime", self.start_time.map(|t| t.timestamp_millis().into())),
            ("endTime", self.end_time.map(|t| t.timestamp_millis().into())),
            ("filterPattern", self.filter_pattern.clone().map(Into::into)),
            ("limit", self.limit.map(Into::into)),
        ])
    }
}

/// A matched log event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    /// Event time, epoch milliseconds.
    pub timestamp: i64,
    /// Event message.
    pub message: String,
    /// Ingestion time, epoch milliseconds.
    pub ingestion_time: i64,
    /// Stream the event belongs to.
    #[serde(default)]
    pub log_stream_name: Option<String>,
    /// Event ID.
    #[serde(default)]
    pub event_id: Option<String>,
}

serde_from_wire!(LogEvent);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_params_use_epoch_millis() {
        let mut input = FilterLogEventsInput::new("/app/api");
        input.start_time = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        input.limit = Some(50);

        let params = input.to_params();
        assert_eq!(params["logGroupName"], json!("/app/api"));
        assert_eq!(params["startTime"], json!(1_704_067_200_000_i64));
        assert_eq!(params["limit"], json!(50));
        assert!(!params.contains_key("endTime"));
        assert!(!params.contains_key("logStreamNamePrefix"));
    }
}
