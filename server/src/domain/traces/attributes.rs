//! OTLP attribute value decoding
//!
//! Maps `AnyValue` trees to plain JSON values:
//!
//! | OTLP variant | JSON |
//! |--------------|------|
//! | string / bool | string / bool |
//! | int | integer (exact, no float round-trip) |
//! | double | number; NaN and infinities are dropped |
//! | array | array; undecodable elements are dropped |
//! | kvlist | object; the last duplicate key wins |
//! | bytes | base64 string (standard alphabet, padded) |

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Number, Value as JsonValue};

use super::model::{AnyValue, KeyValue};

/// Decode a single value. `None` means "no usable value".
pub fn decode_value(value: &AnyValue) -> Option<JsonValue> {
    match value {
        AnyValue::String(s) => Some(JsonValue::String(s.clone())),
        AnyValue::Bool(b) => Some(JsonValue::Bool(*b)),
        AnyValue::Int(i) => Some(JsonValue::Number((*i).into())),
        AnyValue::Double(d) => Number::from_f64(*d).map(JsonValue::Number),
        AnyValue::Array(values) => Some(JsonValue::Array(
            values.iter().filter_map(decode_value).collect(),
        )),
        AnyValue::KvList(values) => Some(JsonValue::Object(decode_attributes(values))),
        AnyValue::Bytes(bytes) => Some(JsonValue::String(STANDARD.encode(bytes))),
    }
}

/// Decode a key/value list into a flat map.
/// Entries without a usable value are omitted; later duplicates replace earlier ones.
pub fn decode_attributes(attributes: &[KeyValue]) -> Map<String, JsonValue> {
    let mut map = Map::with_capacity(attributes.len());
    for kv in attributes {
        if let Some(value) = kv.value.as_ref().and_then(decode_value) {
            map.insert(kv.key.clone(), value);
        }
    }
    map
}
