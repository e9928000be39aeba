//! Canonical span enums
//!
//! OTLP carries kind and status as small integers. Rows store the lowercase
//! names below.

use serde::{Deserialize, Serialize};

// ============================================================================
// SPAN KIND
// ============================================================================

/// Role of a span within its trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    #[default]
    Internal,
    Server,
    Client,
    Producer,
    Consumer,
}

impl SpanKind {
    /// Map the OTLP `SpanKind` enum value.
    /// UNSPECIFIED (0), INTERNAL (1) and unknown values are `Internal`.
    pub fn from_otlp(kind: i32) -> Self {
        match kind {
            2 => Self::Server,
            3 => Self::Client,
            4 => Self::Producer,
            5 => Self::Consumer,
            _ => Self::Internal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Server => "server",
            Self::Client => "client",
            Self::Producer => "producer",
            Self::Consumer => "consumer",
        }
    }
}

// ============================================================================
// SPAN STATUS
// ============================================================================

/// Outcome of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpanStatus {
    #[default]
    Ok,
    Error,
}

impl SpanStatus {
    /// Map the OTLP `Status.code` value. Only ERROR (2) is an error.
    pub fn from_otlp(code: i32) -> Self {
        match code {
            2 => Self::Error,
            _ => Self::Ok,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }
}

// ============================================================================
// TRACE SOURCE
// ============================================================================

/// Ingestion path that produced a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TraceSource {
    /// OTLP export from the eBPF auto-instrumentation agent
    #[default]
    Ebpf,
    Http,
    Scheduler,
}

impl TraceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ebpf => "ebpf",
            Self::Http => "http",
            Self::Scheduler => "scheduler",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_kind_from_otlp() {
        assert_eq!(SpanKind::from_otlp(0), SpanKind::Internal);
        assert_eq!(SpanKind::from_otlp(1), SpanKind::Internal);
        assert_eq!(SpanKind::from_otlp(2), SpanKind::Server);
        assert_eq!(SpanKind::from_otlp(3), SpanKind::Client);
        assert_eq!(SpanKind::from_otlp(4), SpanKind::Producer);
        assert_eq!(SpanKind::from_otlp(5), SpanKind::Consumer);
        assert_eq!(SpanKind::from_otlp(6), SpanKind::Internal);
        assert_eq!(SpanKind::from_otlp(-1), SpanKind::Internal);
    }

    #[test]
    fn test_span_status_from_otlp() {
        assert_eq!(SpanStatus::from_otlp(0), SpanStatus::Ok);
        assert_eq!(SpanStatus::from_otlp(1), SpanStatus::Ok);
        assert_eq!(SpanStatus::from_otlp(2), SpanStatus::Error);
        assert_eq!(SpanStatus::from_otlp(9), SpanStatus::Ok);
    }

    #[test]
    fn test_serde_matches_as_str() {
        for kind in [
            SpanKind::Internal,
            SpanKind::Server,
            SpanKind::Client,
            SpanKind::Producer,
            SpanKind::Consumer,
        ] {
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                serde_json::json!(kind.as_str())
            );
        }
        assert_eq!(
            serde_json::to_value(SpanStatus::Error).unwrap(),
            serde_json::json!("error")
        );
        assert_eq!(
            serde_json::to_value(TraceSource::Scheduler).unwrap(),
            serde_json::json!("scheduler")
        );
    }
}
