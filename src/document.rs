use serde_json::{Map, Value};

/// Decodes a databag value, keeping it as a raw string when it isn't JSON
///
/// Peers have historically written both JSON-encoded and plain values under
/// the same keys, so a decode failure is not treated as corruption.
pub fn decode_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Wraps a payload under a single field, forming a schema-checkable document
pub(crate) fn wrap(field: &str, value: Value) -> Value {
    let mut document = Map::new();
    document.insert(field.to_string(), value);
    Value::Object(document)
}
