//! SQS records.

use serde::{Deserialize, Serialize};

/// Result of `send_message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageOutput {
    /// Message ID.
    #[serde(rename = "MessageId")]
    pub message_id: String,
    /// MD5 digest of the body.
    #[serde(rename = "MD5OfMessageBody")]
    pub md5_of_message_body: String,
    /// Sequence number, for FIFO queues.
    #[serde(rename = "SequenceNumber", default)]
    pub sequence_number: Option<String>,
}

serde_from_wire!(SendMessageOutput);
