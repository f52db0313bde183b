//! SQS facade.

use super::Binding;
use crate::client::ClientSource;
use crate::error::{BoxError, DecodeError, FacadeResult};
use crate::guard::{guard, guard_sync};
use crate::types::sqs::SendMessageOutput;
use crate::types::FromWire;
use crate::wire;
use url::Url;

const SERVICE: &str = "sqs";

/// Region a queue lives in, read from its URL.
///
/// Queue URLs look like `https://sqs.<region>.amazonaws.com/<account>/<name>`;
/// the region is the second label of the host.
pub fn region_from_queue_url(queue_url: &str) -> FacadeResult<String> {
    guard_sync(crate::operation!("region_from_queue_url"), || {
        let url = Url::parse(queue_url)?;
        let region = url
            .host_str()
            .and_then(|host| host.split('.').nth(1))
            .filter(|label| !label.is_empty())
            .ok_or_else(|| DecodeError::invalid("QueueUrl", "a regional SQS queue URL"))?;
        Ok::<_, BoxError>(region.to_string())
    })
}

/// Service for SQS operations.
#[derive(Debug, Clone, Default)]
pub struct SqsService {
    binding: Binding,
}

impl SqsService {
    /// Create a new SQS service.
    pub fn new(source: impl Into<ClientSource>) -> Self {
        Self {
            binding: Binding::new(source.into()),
        }
    }

    /// Send one message to a queue.
    pub async fn send_message(&self, queue_url: &str, body: &str) -> FacadeResult<SendMessageOutput> {
        guard(crate::operation!("send_message"), async {
            let client = self.binding.client(SERVICE).await?;
            let params = wire::params([
                ("QueueUrl", Some(queue_url.into())),
                ("MessageBody", Some(body.into())),
            ]);
            let response = client.invoke("SendMessage", params).await?;
            Ok::<_, BoxError>(SendMessageOutput::from_wire(&response)?)
        })
        .await
    }
}
