//! SES records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text with an optional character set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Content {
    /// The text.
    pub data: String,
    /// Character set, e.g. `UTF-8`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
}

impl Content {
    /// UTF-8 text.
    pub fn utf8(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            charset: Some("UTF-8".to_string()),
        }
    }
}

/// Message body; at least one part should be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Body {
    /// Plain-text part.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Content>,
    /// HTML part.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<Content>,
}

/// Subject and body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Message {
    /// Subject line.
    pub subject: Content,
    /// Body.
    pub body: Body,
}

/// Recipients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Destination {
    /// To recipients.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub to_addresses: Vec<String>,
    /// Cc recipients.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub cc_addresses: Vec<String>,
    /// Bcc recipients.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub bcc_addresses: Vec<String>,
}

/// A formatted email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Email {
    /// Sender address.
    pub source: String,
    /// Recipients.
    pub destination: Destination,
    /// Content.
    pub message: Message,
}

impl Email {
    /// A plain-text email to one recipient.
    pub fn text(
        source: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            destination: Destination {
                to_addresses: vec![to.into()],
                ..Default::default()
            },
            message: Message {
                subject: Content::utf8(subject),
                body: Body {
                    text: Some(Content::utf8(text)),
                    html: None,
                },
            },
        }
    }
}

/// Result of a send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendEmailOutput {
    /// Message ID assigned by SES.
    pub message_id: String,
    /// Response metadata, e.g. the request ID.
    #[serde(default)]
    pub response_metadata: Option<Value>,
}

serde_from_wire!(SendEmailOutput);
