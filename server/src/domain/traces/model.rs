//! Transport-neutral OTLP trace export tree
//!
//! Both wire decoders produce these types. Proto3 default values are
//! mapped to `None` so downstream code can tell "absent" from "zero".

/// Trace/span identifier as it arrived on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// Binary transport: raw id bytes (normally 16 or 8)
    Raw(Vec<u8>),
    /// Text transport: opaque string, trusted as sent
    Text(String),
}

/// OTLP `AnyValue` with exactly one populated variant.
/// A value with no variant is represented by `None` at the use site.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyValue {
    String(String),
    Bool(bool),
    Int(i64),
    Double(f64),
    Array(Vec<AnyValue>),
    KvList(Vec<KeyValue>),
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub key: String,
    pub value: Option<AnyValue>,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: AnyValue) -> Self {
        Self {
            key: key.into(),
            value: Some(value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportRequest {
    pub resource_spans: Vec<ResourceSpans>,
}

impl ExportRequest {
    /// Total number of wire spans across the tree
    pub fn span_count(&self) -> usize {
        self.resource_spans
            .iter()
            .flat_map(|rs| &rs.scope_spans)
            .map(|ss| ss.spans.len())
            .sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceSpans {
    pub resource: Vec<KeyValue>,
    pub scope_spans: Vec<ScopeSpans>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeSpans {
    pub scope: Option<InstrumentationScope>,
    pub spans: Vec<Span>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstrumentationScope {
    pub name: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Span {
    pub trace_id: Option<Identifier>,
    pub span_id: Option<Identifier>,
    pub parent_span_id: Option<Identifier>,
    pub name: Option<String>,
    /// Raw OTLP `SpanKind` value
    pub kind: Option<i32>,
    pub start_time_unix_nano: Option<u64>,
    pub end_time_unix_nano: Option<u64>,
    pub status: Option<Status>,
    pub attributes: Vec<KeyValue>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Status {
    /// Raw OTLP `Status.code` value
    pub code: i32,
    pub message: Option<String>,
}
