//! Flat wire records
//!
//! A wire record is the ordered JSON object produced by one traversal of a
//! typed value, before it is handed to `serde_json`. Decoding reads typed
//! values back out of a record by key.

use octofhir_fhirbind_diagnostics::{CodecError, Result};
use serde_json::Value;

/// Ordered key/value mapping for one JSON object
pub type WireRecord = serde_json::Map<String, Value>;

/// Key carrying the type discriminator of a polymorphic resource
pub const RESOURCE_TYPE_KEY: &str = "resourceType";

/// Key of the metadata sibling for a primitive stored under `key`
pub fn metadata_key(key: &str) -> String {
    format!("_{key}")
}

/// Key of one candidate of a choice field (`onset` + `DateTime`)
pub fn choice_key(field: &str, suffix: &str) -> String {
    format!("{field}{suffix}")
}

/// Get the value stored under `key`, treating an explicit `null` as absent
pub fn get<'a>(record: &'a WireRecord, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|value| !value.is_null())
}

/// Short name of a JSON value's shape, used in error messages
pub fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// View a value as an object
pub fn as_object<'a>(key: &str, value: &'a Value) -> Result<&'a WireRecord> {
    value
        .as_object()
        .ok_or_else(|| CodecError::invalid_value(key, "object", describe(value)))
}

/// Get the array stored under `key`; absent or `null` yields an empty slice
pub fn array<'a>(key: &str, record: &'a WireRecord) -> Result<&'a [Value]> {
    match get(record, key) {
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(other) => Err(CodecError::invalid_value(key, "array", describe(other))),
        None => Ok(&[]),
    }
}

/// Write a plain string attribute such as an element id or extension url
pub fn write_attribute(value: &Option<String>, key: &str, record: &mut WireRecord) {
    if let Some(value) = value {
        record.insert(key.to_string(), Value::String(value.clone()));
    }
}

/// Read a plain string attribute
pub fn read_attribute(key: &str, record: &WireRecord) -> Result<Option<String>> {
    match get(record, key) {
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(other) => Err(CodecError::invalid_value(key, "string", describe(other))),
        None => Ok(None),
    }
}

/// Read the `resourceType` discriminator of a polymorphic resource record
pub fn discriminator(record: &WireRecord) -> Result<&str> {
    match record.get(RESOURCE_TYPE_KEY) {
        Some(Value::String(name)) => Ok(name.as_str()),
        Some(Value::Null) | None => Err(CodecError::MissingDiscriminator),
        Some(other) => Err(CodecError::invalid_value(
            RESOURCE_TYPE_KEY,
            "string",
            describe(other),
        )),
    }
}
