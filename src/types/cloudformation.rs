//! CloudFormation records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stack input parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackParameter {
    /// Parameter key.
    pub parameter_key: String,
    /// Parameter value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_value: Option<String>,
    /// Reuse the value from the previous deployment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_previous_value: Option<bool>,
}

impl StackParameter {
    /// Create a parameter with an explicit value.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            parameter_key: key.into(),
            parameter_value: Some(value.into()),
            use_previous_value: None,
        }
    }
}

/// A stack output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackOutput {
    /// Output key.
    pub output_key: Option<String>,
    /// Output value.
    pub output_value: Option<String>,
    /// Output description.
    #[serde(default)]
    pub description: Option<String>,
    /// Export name, if exported.
    #[serde(default)]
    pub export_name: Option<String>,
}

/// A stack, as described or listed.
///
/// Listing only fills in identity and status; the remaining fields are set by
/// `describe_stacks`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Stack {
    /// Stack ID.
    pub stack_id: Option<String>,
    /// Stack name.
    pub stack_name: Option<String>,
    /// Stack status, e.g. `CREATE_COMPLETE`.
    pub stack_status: Option<String>,
    /// Template description.
    pub description: Option<String>,
    /// Input parameters.
    pub parameters: Option<Vec<StackParameter>>,
    /// Outputs.
    pub outputs: Option<Vec<StackOutput>>,
    /// Creation time.
    #[serde(deserialize_with = "crate::wire::timestamp::optional")]
    pub creation_time: Option<DateTime<Utc>>,
}

serde_from_wire!(Stack);

/// Input of `create_stack`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateStackInput {
    /// Stack name.
    pub stack_name: String,
    /// Template location.
    #[serde(rename = "TemplateURL")]
    pub template_url: String,
    /// Input parameters.
    pub parameters: Vec<StackParameter>,
    /// Acknowledged capabilities, e.g. `CAPABILITY_IAM`.
    pub capabilities: Vec<String>,
}

impl CreateStackInput {
    /// Create an input with no parameters or capabilities.
    pub fn new(stack_name: impl Into<String>, template_url: impl Into<String>) -> Self {
        Self {
            stack_name: stack_name.into(),
            template_url: template_url.into(),
            parameters: Vec::new(),
            capabilities: Vec::new(),
        }
    }

    /// Add a parameter.
    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push(StackParameter::new(key, value));
        self
    }

    /// Acknowledge a capability.
    pub fn capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.push(capability.into());
        self
    }
}
