//! EventBridge Scheduler records.

use super::{decode_list, FromWire};
use crate::error::DecodeError;
use crate::wire::{self, WireMap};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use super::Tag;

/// Window within which the target may be invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FlexibleTimeWindow {
    /// `OFF` or `FLEXIBLE`.
    pub mode: String,
    /// Window size when flexible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_window_in_minutes: Option<u32>,
}

impl FlexibleTimeWindow {
    /// Invoke exactly on schedule.
    pub fn off() -> Self {
        Self {
            mode: "OFF".to_string(),
            maximum_window_in_minutes: None,
        }
    }

    /// Invoke anywhere within `minutes` of the scheduled time.
    pub fn flexible(minutes: u32) -> Self {
        Self {
            mode: "FLEXIBLE".to_string(),
            maximum_window_in_minutes: Some(minutes),
        }
    }
}

/// What a schedule invokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Target {
    /// Target ARN.
    pub arn: String,
    /// Role the scheduler assumes to invoke the target.
    pub role_arn: String,
    /// Payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    /// Dead-letter queue settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dead_letter_config: Option<Value>,
    /// Retry settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_policy: Option<Value>,
}

impl Target {
    /// Create a target.
    pub fn new(arn: impl Into<String>, role_arn: impl Into<String>) -> Self {
        Self {
            arn: arn.into(),
            role_arn: role_arn.into(),
            input: None,
            dead_letter_config: None,
            retry_policy: None,
        }
    }
}

/// Input of `create_schedule` and `update_schedule`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScheduleInput {
    /// Schedule name.
    pub name: String,
    /// `rate(...)`, `cron(...)` or `at(...)`.
    pub schedule_expression: String,
    /// Invocation window.
    pub flexible_time_window: FlexibleTimeWindow,
    /// Target.
    pub target: Target,
    /// Group; the service uses `default` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `ENABLED` or `DISABLED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// First invocation no earlier than this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    /// No invocation after this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    /// Time zone of the expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_expression_timezone: Option<String>,
    /// Customer managed key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms_key_arn: Option<String>,
    /// `NONE` or `DELETE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_after_completion: Option<String>,
}

impl ScheduleInput {
    /// Create an input with only the required members.
    pub fn new(
        name: impl Into<String>,
        schedule_expression: impl Into<String>,
        flexible_time_window: FlexibleTimeWindow,
        target: Target,
    ) -> Self {
        Self {
            name: name.into(),
            schedule_expression: schedule_expression.into(),
            flexible_time_window,
            target,
            group_name: None,
            description: None,
            state: None,
            start_date: None,
            end_date: None,
            schedule_expression_timezone: None,
            kms_key_arn: None,
            action_after_completion: None,
        }
    }

    /// Place the schedule in `group`.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group_name = Some(group.into());
        self
    }
}

/// A schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Schedule {
    /// Schedule name.
    pub name: String,
    /// Schedule ARN.
    #[serde(default)]
    pub arn: Option<String>,
    /// Group name.
    #[serde(default)]
    pub group_name: Option<String>,
    /// Expression.
    pub schedule_expression: String,
    /// Time zone of the expression.
    #[serde(default)]
    pub schedule_expression_timezone: Option<String>,
    /// Invocation window.
    pub flexible_time_window: FlexibleTimeWindow,
    /// Target.
    pub target: Target,
    /// `ENABLED` or `DISABLED`.
    #[serde(default)]
    pub state: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Start date.
    #[serde(default, deserialize_with = "crate::wire::timestamp::optional")]
    pub start_date: Option<DateTime<Utc>>,
    /// End date.
    #[serde(default, deserialize_with = "crate::wire::timestamp::optional")]
    pub end_date: Option<DateTime<Utc>>,
    /// Creation time.
    #[serde(default, deserialize_with = "crate::wire::timestamp::optional")]
    pub creation_date: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(default, deserialize_with = "crate::wire::timestamp::optional")]
    pub last_modification_date: Option<DateTime<Utc>>,
    /// Customer managed key.
    #[serde(default)]
    pub kms_key_arn: Option<String>,
    /// `NONE` or `DELETE`.
    #[serde(default)]
    pub action_after_completion: Option<String>,
}

/// A schedule group, as described or listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScheduleGroup {
    /// Group name.
    pub name: String,
    /// Group ARN.
    #[serde(default)]
    pub arn: Option<String>,
    /// `ACTIVE` or `DELETING`.
    #[serde(default)]
    pub state: Option<String>,
    /// Creation time.
    #[serde(default, deserialize_with = "crate::wire::timestamp::optional")]
    pub creation_date: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(default, deserialize_with = "crate::wire::timestamp::optional")]
    pub last_modification_date: Option<DateTime<Utc>>,
}

/// A schedule listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScheduleSummary {
    /// Schedule name.
    pub name: String,
    /// Schedule ARN.
    #[serde(default)]
    pub arn: Option<String>,
    /// Group name.
    #[serde(default)]
    pub group_name: Option<String>,
    /// `ENABLED` or `DISABLED`.
    #[serde(default)]
    pub state: Option<String>,
    /// Target summary.
    #[serde(default)]
    pub target: Option<Value>,
    /// Creation time.
    #[serde(default, deserialize_with = "crate::wire::timestamp::optional")]
    pub creation_date: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(default, deserialize_with = "crate::wire::timestamp::optional")]
    pub last_modification_date: Option<DateTime<Utc>>,
}

serde_from_wire!(Schedule, ScheduleGroup, ScheduleSummary);

/// Filters of `list_schedules`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSchedulesInput {
    /// Only schedules in this group.
    pub group_name: Option<String>,
    /// Only names with this prefix.
    pub name_prefix: Option<String>,
    /// Only schedules in this state.
    pub state: Option<String>,
    /// Page size.
    pub max_results: Option<u32>,
    /// Token from a previous page.
    pub next_token: Option<String>,
}

/// Filters of `list_schedule_groups`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListScheduleGroupsInput {
    /// Only names with this prefix.
    pub name_prefix: Option<String>,
    /// Page size.
    pub max_results: Option<u32>,
    /// Token from a previous page.
    pub next_token: Option<String>,
}

/// One page of schedules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListSchedulesOutput {
    /// Schedules in this page.
    pub schedules: Vec<ScheduleSummary>,
    /// Token for the next page.
    pub next_token: Option<String>,
}

/// One page of schedule groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListScheduleGroupsOutput {
    /// Groups in this page.
    pub schedule_groups: Vec<ScheduleGroup>,
    /// Token for the next page.
    pub next_token: Option<String>,
}

impl ListSchedulesInput {
    pub(crate) fn to_params(&self) -> WireMap {
        wire::params([
            ("GroupName", self.group_name.clone().map(Into::into)),
            ("NamePrefix", self.name_prefix.clone().map(Into::into)),
            ("State", self.state.clone().map(Into::into)),
            ("MaxResults", self.max_results.map(Into::into)),
            ("NextToken", self.next_token.clone().map(Into::into)),
        ])
    }
}

impl ListScheduleGroupsInput {
    pub(crate) fn to_params(&self) -> WireMap {
        wire::params([
            ("NamePrefix", self.name_prefix.clone().map(Into::into)),
            ("MaxResults", self.max_results.map(Into::into)),
            ("NextToken", self.next_token.clone().map(Into::into)),
        ])
    }
}

impl FromWire for ListSchedulesOutput {
    fn from_wire(map: &WireMap) -> Result<Self, DecodeError> {
        Ok(Self {
            schedules: decode_list(map, "Schedules")?,
            next_token: wire::optional_str(map, "NextToken")?.filter(|t| !t.is_empty()),
        })
    }
}

impl FromWire for ListScheduleGroupsOutput {
    fn from_wire(map: &WireMap) -> Result<Self, DecodeError> {
        Ok(Self {
            schedule_groups: decode_list(map, "ScheduleGroups")?,
            next_token: wire::optional_str(map, "NextToken")?.filter(|t| !t.is_empty()),
        })
    }
}
