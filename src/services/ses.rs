//! SES facade.

use super::Binding;
use crate::client::ClientSource;
use crate::error::{BoxError, FacadeResult};
use crate::guard::guard;
use crate::types::ses::{Email, SendEmailOutput};
use crate::types::FromWire;
use crate::wire;
use serde_json::json;

const SERVICE: &str = "ses";

/// Service for sending email through SES.
#[derive(Debug, Clone, Default)]
pub struct SesService {
    binding: Binding,
}

impl SesService {
    /// Create a new SES service.
    pub fn new(source: impl Into<ClientSource>) -> Self {
        Self {
            binding: Binding::new(source.into()),
        }
    }

    /// Send a formatted email.
    pub async fn send_email(&self, email: &Email) -> FacadeResult<SendEmailOutput> {
        guard(crate::operation!("send_email"), async {
            let client = self.binding.client(SERVICE).await?;
            let response = client.invoke("SendEmail", wire::encode(email)?).await?;
            Ok::<_, BoxError>(SendEmailOutput::from_wire(&response)?)
        })
        .await
    }

    /// Send a complete MIME message as-is.
    pub async fn send_raw_email(&self, raw_message: &[u8]) -> FacadeResult<SendEmailOutput> {
        guard(crate::operation!("send_raw_email"), async {
            let client = self.binding.client(SERVICE).await?;
            let params = wire::params([("RawMessage", Some(json!({"Data": wire::blob(raw_message)})))]);
            let response = client.invoke("SendRawEmail", params).await?;
            Ok::<_, BoxError>(SendEmailOutput::from_wire(&response)?)
        })
        .await
    }
}
