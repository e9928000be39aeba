//! Normalized span rows
//!
//! One `NormalizedSpan` per wire span, flattened and ready for the `spans` table.

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use super::{SpanKind, SpanStatus, TraceSource};

// ============================================================================
// SEMANTIC CONVENTION COLUMNS
// ============================================================================

/// Well-known OpenTelemetry attributes promoted to dedicated columns.
/// Every field is optional; absent attributes leave the column null.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SemconvColumns {
    // Service
    pub service_namespace: Option<String>,
    pub service_instance_id: Option<String>,
    pub service_version: Option<String>,
    pub deployment_environment: Option<String>,

    // Container / Kubernetes
    pub container_id: Option<String>,
    pub container_name: Option<String>,
    pub k8s_namespace: Option<String>,
    pub k8s_pod_name: Option<String>,
    pub k8s_container_name: Option<String>,

    // Network endpoints
    pub server_address: Option<String>,
    pub server_port: Option<i64>,
    pub client_address: Option<String>,
    pub client_port: Option<i64>,

    // URL
    pub url_full: Option<String>,
    pub url_scheme: Option<String>,
    pub url_path: Option<String>,

    // Network protocol
    pub network_transport: Option<String>,
    pub network_protocol_name: Option<String>,
    pub network_protocol_version: Option<String>,

    // Host / OS / process
    pub host_name: Option<String>,
    pub host_arch: Option<String>,
    pub os_type: Option<String>,
    pub os_version: Option<String>,
    pub process_pid: Option<i64>,
    pub process_executable_name: Option<String>,

    // Telemetry SDK
    pub telemetry_sdk_name: Option<String>,
    pub telemetry_sdk_language: Option<String>,
    pub telemetry_sdk_version: Option<String>,

    // Instrumentation scope
    pub scope_name: Option<String>,
    pub scope_version: Option<String>,
}

// ============================================================================
// NORMALIZED SPAN
// ============================================================================

/// Flat span record written by the persistence layer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedSpan {
    /// Canonical span id (primary key)
    pub id: String,
    pub trace_id: String,
    pub parent_span_id: Option<String>,
    pub name: String,
    pub kind: SpanKind,
    pub status: SpanStatus,
    pub status_message: Option<String>,

    // Time (nanoseconds since Unix epoch)
    pub start_time_unix_nano: u64,
    /// Null whenever `duration_ms` is null
    pub end_time_unix_nano: Option<u64>,
    pub duration_ms: Option<u64>,

    pub service_name: String,
    #[serde(flatten)]
    pub columns: SemconvColumns,

    /// Resource attributes overlaid by span attributes
    pub attributes: Map<String, JsonValue>,
    pub trace_source: TraceSource,
}
