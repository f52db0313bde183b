//! S3 records.

use super::FromWire;
use crate::error::DecodeError;
use crate::wire::{self, WireMap};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Bucket {
    /// Bucket name.
    pub name: String,
    /// Creation time.
    #[serde(deserialize_with = "crate::wire::timestamp::required")]
    pub creation_date: DateTime<Utc>,
    /// Region the bucket lives in, when reported.
    #[serde(default)]
    pub bucket_region: Option<String>,
}

/// An object listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectSummary {
    /// Object key.
    pub key: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// Entity tag.
    #[serde(default, rename = "ETag")]
    pub e_tag: Option<String>,
    /// Last modification time.
    #[serde(default, deserialize_with = "crate::wire::timestamp::optional")]
    pub last_modified: Option<DateTime<Utc>>,
    /// Storage class.
    #[serde(default)]
    pub storage_class: Option<String>,
}

serde_from_wire!(Bucket, ObjectSummary);

/// An object and its body.
///
/// The provider client delivers the body base64-encoded under `Body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Object {
    /// Object body.
    pub body: Bytes,
    /// Content type.
    pub content_type: Option<String>,
    /// Content length.
    pub content_length: Option<u64>,
    /// Last modification time.
    pub last_modified: Option<DateTime<Utc>>,
    /// Entity tag.
    pub e_tag: Option<String>,
}

impl FromWire for S3Object {
    fn from_wire(map: &WireMap) -> Result<Self, DecodeError> {
        Ok(Self {
            body: wire::optional_blob(map, "Body")?.unwrap_or_default(),
            content_type: wire::optional_str(map, "ContentType")?,
            content_length: wire::optional_u64(map, "ContentLength")?,
            last_modified: wire::optional_timestamp(map, "LastModified")?,
            e_tag: wire::optional_str(map, "ETag")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_body_decoded() {
        let map = json!({
            "Body": wire::blob(b"hello"),
            "ContentType": "text/plain",
            "ContentLength": 5,
            "ETag": "\"5d41402abc4b2a76b9719d911017c592\"",
            "LastModified": "2024-01-15T10:30:00Z"
        });
        let object = S3Object::from_wire(map.as_object().unwrap()).unwrap();
        assert_eq!(object.body, Bytes::from_static(b"hello"));
        assert_eq!(object.content_length, Some(5));
        assert!(object.last_modified.is_some());
    }

    #[test]
    fn test_object_bad_body() {
        let map = json!({"Body": "not base64!"});
        assert!(matches!(
            S3Object::from_wire(map.as_object().unwrap()),
            Err(DecodeError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_summary_etag_name() {
        let map = json!({"Key": "a.txt", "ETag": "\"abc\"", "Size": 3});
        let summary = ObjectSummary::from_wire(map.as_object().unwrap()).unwrap();
        assert_eq!(summary.e_tag.as_deref(), Some("\"abc\""));
        assert_eq!(summary.size, Some(3));
    }
}
