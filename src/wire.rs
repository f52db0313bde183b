//! Wire-format maps.
//!
//! Provider clients exchange request and response maps as JSON objects keyed
//! by the provider's PascalCase (or camelCase) member names. This module holds
//! the helpers records use to read and write them.

use crate::error::DecodeError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A request or response map.
pub type WireMap = serde_json::Map<String, Value>;

/// Decode a whole map into a serde record.
pub fn decode<T: DeserializeOwned>(map: &WireMap) -> Result<T, DecodeError> {
    Ok(serde_json::from_value(Value::Object(map.clone()))?)
}

/// Decode the value under `field` into a serde record.
pub fn decode_field<T: DeserializeOwned>(map: &WireMap, field: &str) -> Result<T, DecodeError> {
    let value = map
        .get(field)
        .filter(|v| !v.is_null())
        .ok_or_else(|| DecodeError::missing(field))?;
    Ok(serde_json::from_value(value.clone())?)
}

/// Encode a serde record as a request map.
pub fn encode<T: Serialize>(value: &T) -> Result<WireMap, DecodeError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(DecodeError::invalid("request", "an object")),
    }
}

/// Build a map from `(key, value)` pairs, skipping `None` values.
pub fn params<I, K>(pairs: I) -> WireMap
where
    I: IntoIterator<Item = (K, Option<Value>)>,
    K: Into<String>,
{
    pairs
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.into(), v)))
        .collect()
}

/// View a value as a map.
pub fn as_map<'a>(value: &'a Value, field: &str) -> Result<&'a WireMap, DecodeError> {
    value
        .as_object()
        .ok_or_else(|| DecodeError::invalid(field, "an object"))
}

/// Required string field.
pub fn required_str(map: &WireMap, field: &str) -> Result<String, DecodeError> {
    optional_str(map, field)?.ok_or_else(|| DecodeError::missing(field))
}

/// Optional string field; null counts as absent.
pub fn optional_str(map: &WireMap, field: &str) -> Result<Option<String>, DecodeError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(DecodeError::invalid(field, "a string")),
    }
}

/// Optional object field.
pub fn optional_map(map: &WireMap, field: &str) -> Result<Option<WireMap>, DecodeError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(inner)) => Ok(Some(inner.clone())),
        Some(_) => Err(DecodeError::invalid(field, "an object")),
    }
}

/// Optional unsigned integer field.
pub fn optional_u64(map: &WireMap, field: &str) -> Result<Option<u64>, DecodeError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .map(Some)
            .ok_or_else(|| DecodeError::invalid(field, "an unsigned integer")),
    }
}

/// List field; an absent list is empty.
pub fn list<'a>(map: &'a WireMap, field: &str) -> Result<&'a [Value], DecodeError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(DecodeError::invalid(field, "a list")),
    }
}

/// List of records; an absent list is empty.
pub fn records<T: DeserializeOwned>(map: &WireMap, field: &str) -> Result<Vec<T>, DecodeError> {
    list(map, field)?
        .iter()
        .map(|item| serde_json::from_value(item.clone()).map_err(DecodeError::from))
        .collect()
}

/// Optional base64 blob field.
pub fn optional_blob(map: &WireMap, field: &str) -> Result<Option<Bytes>, DecodeError> {
    match optional_str(map, field)? {
        None => Ok(None),
        Some(encoded) => BASE64
            .decode(encoded.as_bytes())
            .map(|raw| Some(Bytes::from(raw)))
            .map_err(|_| DecodeError::invalid(field, "base64 data")),
    }
}

/// Encode bytes for a blob request field.
pub fn blob(data: &[u8]) -> Value {
    Value::String(BASE64.encode(data))
}

/// Optional timestamp field.
pub fn optional_timestamp(map: &WireMap, field: &str) -> Result<Option<DateTime<Utc>>, DecodeError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => parse_timestamp(value)
            .map(Some)
            .ok_or_else(|| DecodeError::invalid(field, "an RFC 3339 or epoch-seconds timestamp")),
    }
}

/// Parse a timestamp in either of the provider's encodings.
///
/// JSON protocols send epoch seconds (possibly fractional), query protocols
/// send RFC 3339 strings.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => {
            let secs = n.as_f64()?;
            let whole = secs.floor();
            let nanos = ((secs - whole) * 1e9).round() as u32;
            Utc.timestamp_opt(whole as i64, nanos).single()
        }
        _ => None,
    }
}

/// serde adapters for timestamp fields.
pub mod timestamp {
    use super::parse_timestamp;
    use chrono::{DateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Deserialize a required timestamp.
    pub fn required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        parse_timestamp(&value).ok_or_else(|| D::Error::custom("invalid timestamp"))
    }

    /// Deserialize an optional timestamp.
    pub fn optional<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => parse_timestamp(&value)
                .map(Some)
                .ok_or_else(|| D::Error::custom("invalid timestamp")),
        }
    }
}
