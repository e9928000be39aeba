//! Span normalization
//!
//! Flattens `resourceSpans[].scopeSpans[].spans[]` into [`NormalizedSpan`] rows.
//! Pure and infallible: spans missing a required field are skipped.

use serde_json::{Map, Value as JsonValue};

use super::attributes::decode_attributes;
use super::ids::canonicalize_opt;
use super::model::{ExportRequest, InstrumentationScope, Span};
use super::semconv::extract_columns;
use crate::core::constants::UNKNOWN_SERVICE_NAME;
use crate::data::{NormalizedSpan, SpanKind, SpanStatus, TraceSource};
use crate::utils::time;

const SERVICE_NAME_KEY: &str = "service.name";

/// Normalize every valid span in the request, in wire order
pub fn normalize(request: &ExportRequest) -> Vec<NormalizedSpan> {
    let mut out = Vec::with_capacity(request.span_count());

    for resource_spans in &request.resource_spans {
        let resource = decode_attributes(&resource_spans.resource);
        let service_name = service_name(&resource);

        for scope_spans in &resource_spans.scope_spans {
            for span in &scope_spans.spans {
                if let Some(row) =
                    normalize_span(span, &resource, &service_name, scope_spans.scope.as_ref())
                {
                    out.push(row);
                }
            }
        }
    }

    out
}

fn service_name(resource: &Map<String, JsonValue>) -> String {
    resource
        .get(SERVICE_NAME_KEY)
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_SERVICE_NAME)
        .to_string()
}

fn normalize_span(
    span: &Span,
    resource: &Map<String, JsonValue>,
    service_name: &str,
    scope: Option<&InstrumentationScope>,
) -> Option<NormalizedSpan> {
    let trace_id = canonicalize_opt(span.trace_id.as_ref());
    let span_id = canonicalize_opt(span.span_id.as_ref());

    let (Some(trace_id), Some(id), Some(name), Some(start)) = (
        trace_id,
        span_id,
        span.name.as_deref().filter(|n| !n.is_empty()),
        span.start_time_unix_nano,
    ) else {
        tracing::debug!(
            span_id = ?span.span_id,
            name = ?span.name,
            "Dropping span missing traceId, spanId, name or startTimeUnixNano"
        );
        return None;
    };

    let mut attributes = resource.clone();
    attributes.extend(decode_attributes(&span.attributes));

    let columns = extract_columns(&attributes, scope);

    let (end_time_unix_nano, duration_ms) = match span
        .end_time_unix_nano
        .and_then(|end| time::duration_ms(start, end).map(|d| (end, d)))
    {
        Some((end, d)) => (Some(end), Some(d)),
        None => (None, None),
    };

    let (status, status_message) = match &span.status {
        Some(s) => (SpanStatus::from_otlp(s.code), s.message.clone()),
        None => (SpanStatus::Ok, None),
    };

    Some(NormalizedSpan {
        id,
        trace_id,
        parent_span_id: canonicalize_opt(span.parent_span_id.as_ref()),
        name: name.to_string(),
        kind: span.kind.map(SpanKind::from_otlp).unwrap_or_default(),
        status,
        status_message,
        start_time_unix_nano: start,
        end_time_unix_nano,
        duration_ms,
        service_name: service_name.to_string(),
        columns,
        attributes,
        trace_source: TraceSource::Ebpf,
    })
}
