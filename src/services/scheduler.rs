//! EventBridge Scheduler facade.
//!
//! `list_schedules` and `list_schedule_groups` return a single page and hand
//! the continuation token back to the caller; `list_all_schedules` drains
//! every page.

use super::Binding;
use crate::client::ClientSource;
use crate::error::{BoxError, FacadeResult};
use crate::guard::guard;
use crate::pagination::{OperationPaginator, TokenSpec};
use crate::types::scheduler::{
    ListScheduleGroupsInput, ListScheduleGroupsOutput, ListSchedulesInput, ListSchedulesOutput,
    Schedule, ScheduleGroup, ScheduleInput, ScheduleSummary, Tag,
};
use crate::types::{decode_list, FromWire};
use crate::wire::{self, WireMap};
use serde_json::Value;
use tracing::info;

const SERVICE: &str = "scheduler";

/// Service for EventBridge Scheduler operations.
#[derive(Debug, Clone, Default)]
pub struct SchedulerService {
    binding: Binding,
}

fn name_params(name: &str, group_name: Option<&str>) -> WireMap {
    wire::params([
        ("Name", Some(Value::from(name))),
        ("GroupName", group_name.map(Into::into)),
    ])
}

impl SchedulerService {
    /// Create a new Scheduler service.
    pub fn new(source: impl Into<ClientSource>) -> Self {
        Self {
            binding: Binding::new(source.into()),
        }
    }

    /// Create a schedule, returning its ARN.
    pub async fn create_schedule(&self, input: &ScheduleInput) -> FacadeResult<String> {
        guard(crate::operation!("create_schedule"), async {
            let client = self.binding.client(SERVICE).await?;
            let response = client.invoke("CreateSchedule", wire::encode(input)?).await?;
            let arn = wire::required_str(&response, "ScheduleArn")?;
            info!(schedule = %input.name, arn = %arn, "Created schedule");
            Ok::<_, BoxError>(arn)
        })
        .await
    }

    /// Replace a schedule's definition, returning its ARN.
    pub async fn update_schedule(&self, input: &ScheduleInput) -> FacadeResult<String> {
        guard(crate::operation!("update_schedule"), async {
            let client = self.binding.client(SERVICE).await?;
            let response = client.invoke("UpdateSchedule", wire::encode(input)?).await?;
            Ok::<_, BoxError>(wire::required_str(&response, "ScheduleArn")?)
        })
        .await
    }

    /// One schedule.
    pub async fn get_schedule(&self, name: &str, group_name: Option<&str>) -> FacadeResult<Schedule> {
        guard(crate::operation!("get_schedule"), async {
            let client = self.binding.client(SERVICE).await?;
            let response = client.invoke("GetSchedule", name_params(name, group_name)).await?;
            Ok::<_, BoxError>(Schedule::from_wire(&response)?)
        })
        .await
    }

    /// Delete a schedule.
    pub async fn delete_schedule(&self, name: &str, group_name: Option<&str>) -> FacadeResult<()> {
        guard(crate::operation!("delete_schedule"), async {
            let client = self.binding.client(SERVICE).await?;
            client.invoke("DeleteSchedule", name_params(name, group_name)).await?;
            Ok::<_, BoxError>(())
        })
        .await
    }

    /// Create a schedule group, returning its ARN.
    pub async fn create_schedule_group(&self, name: &str, tags: &[Tag]) -> FacadeResult<String> {
        guard(crate::operation!("create_schedule_group"), async {
            let client = self.binding.client(SERVICE).await?;
            let mut params = name_params(name, None);
            if !tags.is_empty() {
                params.insert("Tags".to_string(), serde_json::to_value(tags)?);
            }
            let response = client.invoke("CreateScheduleGroup", params).await?;
            Ok::<_, BoxError>(wire::required_str(&response, "ScheduleGroupArn")?)
        })
        .await
    }

    /// One schedule group.
    pub async fn get_schedule_group(&self, name: &str) -> FacadeResult<ScheduleGroup> {
        guard(crate::operation!("get_schedule_group"), async {
            let client = self.binding.client(SERVICE).await?;
            let response = client.invoke("GetScheduleGroup", name_params(name, None)).await?;
            Ok::<_, BoxError>(ScheduleGroup::from_wire(&response)?)
        })
        .await
    }

    /// Delete a schedule group and every schedule in it.
    pub async fn delete_schedule_group(&self, name: &str) -> FacadeResult<()> {
        guard(crate::operation!("delete_schedule_group"), async {
            let client = self.binding.client(SERVICE).await?;
            client.invoke("DeleteScheduleGroup", name_params(name, None)).await?;
            Ok::<_, BoxError>(())
        })
        .await
    }

    /// One page of schedules.
    pub async fn list_schedules(&self, input: &ListSchedulesInput) -> FacadeResult<ListSchedulesOutput> {
        guard(crate::operation!("list_schedules"), async {
            let client = self.binding.client(SERVICE).await?;
            let response = client.invoke("ListSchedules", input.to_params()).await?;
            Ok::<_, BoxError>(ListSchedulesOutput::from_wire(&response)?)
        })
        .await
    }

    /// Every schedule matching the filters, starting from `input.next_token`.
    pub async fn list_all_schedules(
        &self,
        input: &ListSchedulesInput,
    ) -> FacadeResult<Vec<ScheduleSummary>> {
        guard(crate::operation!("list_all_schedules"), async {
            let client = self.binding.client(SERVICE).await?;
            OperationPaginator::new(&client, "ListSchedules", input.to_params(), TokenSpec::NEXT_TOKEN)
                .collect("Schedules", ScheduleSummary::from_wire)
                .await
        })
        .await
    }

    /// One page of schedule groups.
    pub async fn list_schedule_groups(
        &self,
        input: &ListScheduleGroupsInput,
    ) -> FacadeResult<ListScheduleGroupsOutput> {
        guard(crate::operation!("list_schedule_groups"), async {
            let client = self.binding.client(SERVICE).await?;
            let response = client.invoke("ListScheduleGroups", input.to_params()).await?;
            Ok::<_, BoxError>(ListScheduleGroupsOutput::from_wire(&response)?)
        })
        .await
    }

    /// Add tags to a schedule group.
    pub async fn tag_resource(&self, resource_arn: &str, tags: &[Tag]) -> FacadeResult<()> {
        guard(crate::operation!("tag_resource"), async {
            let client = self.binding.client(SERVICE).await?;
            let params = wire::params([
                ("ResourceArn", Some(Value::from(resource_arn))),
                ("Tags", Some(serde_json::to_value(tags)?)),
            ]);
            client.invoke("TagResource", params).await?;
            Ok::<_, BoxError>(())
        })
        .await
    }

    /// Remove tags by key.
    pub async fn untag_resource(&self, resource_arn: &str, tag_keys: &[&str]) -> FacadeResult<()> {
        guard(crate::operation!("untag_resource"), async {
            let client = self.binding.client(SERVICE).await?;
            let params = wire::params([
                ("ResourceArn", Some(Value::from(resource_arn))),
                ("TagKeys", Some(Value::from(tag_keys.to_vec()))),
            ]);
            client.invoke("UntagResource", params).await?;
            Ok::<_, BoxError>(())
        })
        .await
    }

    /// Tags on a schedule group.
    pub async fn list_tags_for_resource(&self, resource_arn: &str) -> FacadeResult<Vec<Tag>> {
        guard(crate::operation!("list_tags_for_resource"), async {
            let client = self.binding.client(SERVICE).await?;
            let params = wire::params([("ResourceArn", Some(Value::from(resource_arn)))]);
            let response = client.invoke("ListTagsForResource", params).await?;
            Ok::<_, BoxError>(decode_list(&response, "Tags")?)
        })
        .await
    }
}
