//! Field accessors for untyped JSON payloads.
//!
//! Backend rows arrive as `serde_json::Value` and are validated field by
//! field rather than deserialized wholesale, so a single bad optional field
//! never rejects an otherwise usable row.

use serde_json::{Map, Value};

/// The `data` array of a `{ data: [...] }` envelope, if the payload has one.
pub fn data_array(payload: &Value) -> Option<&Vec<Value>> {
    payload.as_object()?.get("data")?.as_array()
}

/// A string field that is present and non-blank, trimmed.
pub fn non_empty_string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// First non-blank string among several alias keys.
pub fn first_string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| non_empty_string(obj, key))
}

/// Strings or numbers rendered as strings; identifiers arrive as either.
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Non-blank string entries of an array field; anything else is dropped.
pub fn string_list(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Entries of an array field converted by `convert`; failures are dropped.
pub fn object_list<T>(
    obj: &Map<String, Value>,
    key: &str,
    convert: impl Fn(&Map<String, Value>) -> Option<T>,
) -> Vec<T> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .filter_map(&convert)
                .collect()
        })
        .unwrap_or_default()
}

/// A numeric field, accepting numeric strings.
pub fn number(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// The `message` (or `error`) string of an error envelope.
pub fn message_field(payload: &Value) -> Option<String> {
    let obj = payload.as_object()?;
    first_string(obj, &["message", "error"])
}
