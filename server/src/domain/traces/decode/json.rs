//! Text OTLP (`application/json`) decoding
//!
//! Follows the proto3 JSON mapping used by OTLP/HTTP:
//! - field names in lowerCamelCase, snake_case also accepted
//! - 64-bit integers (timestamps, `intValue`) as decimal strings or numbers
//! - enums (`kind`, `status.code`) as numbers or enum names
//! - ids as strings, taken verbatim
//! - `bytesValue` as base64

use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use opentelemetry_proto::tonic::trace::v1::span::SpanKind as ProtoSpanKind;
use opentelemetry_proto::tonic::trace::v1::status::StatusCode as ProtoStatusCode;
use serde_json::{Map, Value};

use super::{DecodeError, ValidationError, WireError};
use crate::domain::traces::model::{
    AnyValue, ExportRequest, Identifier, InstrumentationScope, KeyValue, ResourceSpans,
    ScopeSpans, Span, Status,
};

type Object = Map<String, Value>;

pub fn decode(body: &[u8]) -> Result<ExportRequest, WireError> {
    let root: Value =
        serde_json::from_slice(body).map_err(|e| DecodeError::Json(e.to_string()))?;

    let Value::Object(root) = root else {
        return Err(ValidationError::new("request body must be a JSON object").into());
    };

    let resource_spans = match field(&root, "resourceSpans", "resource_spans") {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ValidationError::new("resourceSpans must be an array").into()),
        None => return Err(ValidationError::new("missing required field resourceSpans").into()),
    };

    Ok(ExportRequest {
        resource_spans: objects(resource_spans).map(resource_spans_from).collect(),
    })
}

// ============================================================================
// FIELD ACCESS
// ============================================================================

/// Look up a field by its camelCase name, falling back to snake_case
fn field<'a>(obj: &'a Object, camel: &str, snake: &str) -> Option<&'a Value> {
    obj.get(camel)
        .or_else(|| obj.get(snake))
        .filter(|v| !v.is_null())
}

/// Iterate object elements of an array, skipping anything else
fn objects(items: &[Value]) -> impl Iterator<Item = &Object> {
    items.iter().filter_map(Value::as_object)
}

fn array_field<'a>(obj: &'a Object, camel: &str, snake: &str) -> &'a [Value] {
    field(obj, camel, snake)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn string_field(obj: &Object, camel: &str, snake: &str) -> Option<String> {
    field(obj, camel, snake)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Unsigned 64-bit value sent as a decimal string or a JSON number
fn u64_value(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f as u64)
        }),
        _ => None,
    }
}

fn i64_value(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

/// Enum sent as a number, numeric string, or its proto name
fn enum_value(value: &Value, from_name: impl Fn(&str) -> Option<i32>) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|i| i32::try_from(i).ok()),
        Value::String(s) => s.parse().ok().or_else(|| from_name(s)),
        _ => None,
    }
}

fn identifier(obj: &Object, camel: &str, snake: &str) -> Option<Identifier> {
    string_field(obj, camel, snake).map(Identifier::Text)
}

// ============================================================================
// TREE
// ============================================================================

fn resource_spans_from(obj: &Object) -> ResourceSpans {
    let resource = field(obj, "resource", "resource")
        .and_then(Value::as_object)
        .map(|r| attributes(array_field(r, "attributes", "attributes")))
        .unwrap_or_default();

    ResourceSpans {
        resource,
        scope_spans: objects(array_field(obj, "scopeSpans", "scope_spans"))
            .map(scope_spans_from)
            .collect(),
    }
}

fn scope_spans_from(obj: &Object) -> ScopeSpans {
    let scope = field(obj, "scope", "scope")
        .and_then(Value::as_object)
        .map(|s| InstrumentationScope {
            name: string_field(s, "name", "name"),
            version: string_field(s, "version", "version"),
        });

    ScopeSpans {
        scope,
        spans: objects(array_field(obj, "spans", "spans"))
            .map(span_from)
            .collect(),
    }
}

fn span_from(obj: &Object) -> Span {
    let status = field(obj, "status", "status")
        .and_then(Value::as_object)
        .map(|s| Status {
            code: field(s, "code", "code")
                .and_then(|v| {
                    enum_value(v, |name| {
                        ProtoStatusCode::from_str_name(name).map(|c| c as i32)
                    })
                })
                .unwrap_or_default(),
            message: string_field(s, "message", "message"),
        });

    Span {
        trace_id: identifier(obj, "traceId", "trace_id"),
        span_id: identifier(obj, "spanId", "span_id"),
        parent_span_id: identifier(obj, "parentSpanId", "parent_span_id"),
        name: string_field(obj, "name", "name"),
        kind: field(obj, "kind", "kind").and_then(|v| {
            enum_value(v, |name| {
                ProtoSpanKind::from_str_name(name).map(|k| k as i32)
            })
        }),
        start_time_unix_nano: field(obj, "startTimeUnixNano", "start_time_unix_nano")
            .and_then(u64_value),
        end_time_unix_nano: field(obj, "endTimeUnixNano", "end_time_unix_nano")
            .and_then(u64_value),
        status,
        attributes: attributes(array_field(obj, "attributes", "attributes")),
    }
}

// ============================================================================
// ATTRIBUTES
// ============================================================================

fn attributes(items: &[Value]) -> Vec<KeyValue> {
    objects(items)
        .filter_map(|kv| {
            let key = kv.get("key")?.as_str()?.to_string();
            let value = kv.get("value").and_then(any_value);
            Some(KeyValue { key, value })
        })
        .collect()
}

fn any_value(value: &Value) -> Option<AnyValue> {
    let obj = value.as_object()?;

    if let Some(v) = field(obj, "stringValue", "string_value") {
        return v.as_str().map(|s| AnyValue::String(s.to_string()));
    }
    if let Some(v) = field(obj, "boolValue", "bool_value") {
        return v.as_bool().map(AnyValue::Bool);
    }
    if let Some(v) = field(obj, "intValue", "int_value") {
        return i64_value(v).map(AnyValue::Int);
    }
    if let Some(v) = field(obj, "doubleValue", "double_value") {
        return match v {
            Value::Number(n) => n.as_f64(),
            // "NaN", "Infinity" and "-Infinity" arrive as strings
            Value::String(s) => f64::from_str(s).ok(),
            _ => None,
        }
        .map(AnyValue::Double);
    }
    if let Some(v) = field(obj, "arrayValue", "array_value") {
        let values = v.as_object().map(|a| array_field(a, "values", "values"))?;
        return Some(AnyValue::Array(
            values.iter().filter_map(any_value).collect(),
        ));
    }
    if let Some(v) = field(obj, "kvlistValue", "kvlist_value") {
        let values = v.as_object().map(|kv| array_field(kv, "values", "values"))?;
        return Some(AnyValue::KvList(attributes(values)));
    }
    if let Some(v) = field(obj, "bytesValue", "bytes_value") {
        let s = v.as_str()?;
        // Not base64: keep the raw text bytes
        let bytes = STANDARD
            .decode(s)
            .unwrap_or_else(|_| s.as_bytes().to_vec());
        return Some(AnyValue::Bytes(bytes));
    }

    None
}
