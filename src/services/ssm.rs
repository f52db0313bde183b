//! SSM Parameter Store facade.

use super::Binding;
use crate::client::ClientSource;
use crate::config::{ClientConfig, RetryConfig, RetryMode};
use crate::error::{BoxError, FacadeResult};
use crate::guard::guard;
use crate::pagination::{OperationPaginator, TokenSpec};
use crate::types::ssm::{Parameter, ParameterType};
use crate::types::{decode_nested, FromWire};
use crate::wire;
use serde_json::Value;

const SERVICE: &str = "ssm";

/// Attempts the SSM client is configured with.
pub const SSM_MAX_ATTEMPTS: u32 = 10;

fn ssm_client_config() -> ClientConfig {
    ClientConfig::default().with_retry(RetryConfig::new(SSM_MAX_ATTEMPTS, RetryMode::Standard))
}

/// Service for Parameter Store operations.
///
/// Unlike the other facades, the default client is built with a
/// [`SSM_MAX_ATTEMPTS`]-attempt standard retry policy. Retries are carried
/// out by the client factory's transport.
#[derive(Debug, Clone)]
pub struct SsmService {
    binding: Binding,
}

impl Default for SsmService {
    fn default() -> Self {
        Self::new(ClientSource::Default)
    }
}

impl SsmService {
    /// Create a new SSM service.
    pub fn new(source: impl Into<ClientSource>) -> Self {
        Self {
            binding: Binding::new(source.into()).with_config(ssm_client_config()),
        }
    }

    /// Use `config` instead of the SSM retry policy.
    pub fn with_client_config(mut self, config: ClientConfig) -> Self {
        self.binding = self.binding.with_config(config);
        self
    }

    /// One parameter, decrypted if `decrypt` is set.
    pub async fn get_parameter(&self, name: &str, decrypt: bool) -> FacadeResult<Parameter> {
        guard(crate::operation!("get_parameter"), async {
            let client = self.binding.client(SERVICE).await?;
            let params = wire::params([
                ("Name", Some(Value::from(name))),
                ("WithDecryption", Some(decrypt.into())),
            ]);
            let response = client.invoke("GetParameter", params).await?;
            Ok::<_, BoxError>(decode_nested(&response, "Parameter")?)
        })
        .await
    }

    /// Every parameter directly under `path`.
    pub async fn get_parameters_by_path(&self, path: &str, decrypt: bool) -> FacadeResult<Vec<Parameter>> {
        guard(crate::operation!("get_parameters_by_path"), async {
            let client = self.binding.client(SERVICE).await?;
            let params = wire::params([
                ("Path", Some(Value::from(path))),
                ("WithDecryption", Some(decrypt.into())),
            ]);
            OperationPaginator::new(&client, "GetParametersByPath", params, TokenSpec::NEXT_TOKEN)
                .collect("Parameters", Parameter::from_wire)
                .await
        })
        .await
    }

    /// Store a parameter's value under its name.
    pub async fn put_parameter(
        &self,
        parameter: &Parameter,
        overwrite: bool,
        parameter_type: ParameterType,
    ) -> FacadeResult<()> {
        guard(crate::operation!("put_parameter"), async {
            let client = self.binding.client(SERVICE).await?;
            let params = wire::params([
                ("Name", Some(Value::from(parameter.name.as_str()))),
                ("Value", Some(Value::from(parameter.value.as_str()))),
                ("Overwrite", Some(overwrite.into())),
                ("Type", Some(parameter_type.as_str().into())),
            ]);
            client.invoke("PutParameter", params).await?;
            Ok::<_, BoxError>(())
        })
        .await
    }

    /// Delete a parameter.
    pub async fn delete_parameter(&self, name: &str) -> FacadeResult<()> {
        guard(crate::operation!("delete_parameter"), async {
            let client = self.binding.client(SERVICE).await?;
            client
                .invoke("DeleteParameter", wire::params([("Name", Some(name.into()))]))
                .await?;
            Ok::<_, BoxError>(())
        })
        .await
    }
}
