//! Binary OTLP (`application/x-protobuf`) decoding

use opentelemetry_proto::tonic::collector::trace::v1::ExportTraceServiceRequest;
use opentelemetry_proto::tonic::common::v1::{
    AnyValue as ProtoAnyValue, InstrumentationScope as ProtoScope, KeyValue as ProtoKeyValue,
    any_value,
};
use opentelemetry_proto::tonic::trace::v1::{
    ResourceSpans as ProtoResourceSpans, ScopeSpans as ProtoScopeSpans, Span as ProtoSpan,
};
use prost::Message;

use super::DecodeError;
use crate::domain::traces::model::{
    AnyValue, ExportRequest, Identifier, InstrumentationScope, KeyValue, ResourceSpans,
    ScopeSpans, Span, Status,
};

/// Decode an `ExportTraceServiceRequest`. An empty body is a valid empty request.
pub fn decode(body: &[u8]) -> Result<ExportRequest, DecodeError> {
    let request = ExportTraceServiceRequest::decode(body)
        .map_err(|e| DecodeError::Protobuf(e.to_string()))?;
    Ok(request.into())
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

fn non_zero(n: u64) -> Option<u64> {
    (n != 0).then_some(n)
}

fn raw_id(bytes: Vec<u8>) -> Option<Identifier> {
    (!bytes.is_empty()).then_some(Identifier::Raw(bytes))
}

fn convert_value(value: ProtoAnyValue) -> Option<AnyValue> {
    Some(match value.value? {
        any_value::Value::StringValue(s) => AnyValue::String(s),
        any_value::Value::BoolValue(b) => AnyValue::Bool(b),
        any_value::Value::IntValue(i) => AnyValue::Int(i),
        any_value::Value::DoubleValue(d) => AnyValue::Double(d),
        any_value::Value::ArrayValue(arr) => {
            AnyValue::Array(arr.values.into_iter().filter_map(convert_value).collect())
        }
        any_value::Value::KvlistValue(kvlist) => {
            AnyValue::KvList(convert_attributes(kvlist.values))
        }
        any_value::Value::BytesValue(b) => AnyValue::Bytes(b),
    })
}

fn convert_attributes(attributes: Vec<ProtoKeyValue>) -> Vec<KeyValue> {
    attributes
        .into_iter()
        .map(|kv| KeyValue {
            key: kv.key,
            value: kv.value.and_then(convert_value),
        })
        .collect()
}

impl From<ExportTraceServiceRequest> for ExportRequest {
    fn from(request: ExportTraceServiceRequest) -> Self {
        Self {
            resource_spans: request.resource_spans.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ProtoResourceSpans> for ResourceSpans {
    fn from(rs: ProtoResourceSpans) -> Self {
        Self {
            resource: rs
                .resource
                .map(|r| convert_attributes(r.attributes))
                .unwrap_or_default(),
            scope_spans: rs.scope_spans.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ProtoScopeSpans> for ScopeSpans {
    fn from(ss: ProtoScopeSpans) -> Self {
        Self {
            scope: ss.scope.map(Into::into),
            spans: ss.spans.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ProtoScope> for InstrumentationScope {
    fn from(scope: ProtoScope) -> Self {
        Self {
            name: non_empty(scope.name),
            version: non_empty(scope.version),
        }
    }
}

impl From<ProtoSpan> for Span {
    fn from(span: ProtoSpan) -> Self {
        Self {
            trace_id: raw_id(span.trace_id),
            span_id: raw_id(span.span_id),
            parent_span_id: raw_id(span.parent_span_id),
            name: non_empty(span.name),
            kind: Some(span.kind),
            start_time_unix_nano: non_zero(span.start_time_unix_nano),
            end_time_unix_nano: non_zero(span.end_time_unix_nano),
            status: span.status.map(|s| Status {
                code: s.code,
                message: non_empty(s.message),
            }),
            attributes: convert_attributes(span.attributes),
        }
    }
}
