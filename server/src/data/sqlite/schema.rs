//! SQLite schema definitions

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- Spans (one row per span, shared by every ingestion path)
-- =============================================================================
CREATE TABLE IF NOT EXISTS spans (
    id TEXT PRIMARY KEY NOT NULL,
    trace_id TEXT NOT NULL,
    parent_span_id TEXT,
    name TEXT NOT NULL,
    kind TEXT NOT NULL CHECK(kind IN ('internal', 'server', 'client', 'producer', 'consumer')),
    status TEXT NOT NULL CHECK(status IN ('ok', 'error')),
    status_message TEXT,
    start_time TEXT NOT NULL,
    end_time TEXT,
    duration_ms INTEGER CHECK(duration_ms IS NULL OR duration_ms >= 0),
    service_name TEXT NOT NULL,

    service_namespace TEXT,
    service_instance_id TEXT,
    service_version TEXT,
    deployment_environment TEXT,
    container_id TEXT,
    container_name TEXT,
    k8s_namespace TEXT,
    k8s_pod_name TEXT,
    k8s_container_name TEXT,
    server_address TEXT,
    server_port INTEGER,
    client_address TEXT,
    client_port INTEGER,
    url_full TEXT,
    url_scheme TEXT,
    url_path TEXT,
    network_transport TEXT,
    network_protocol_name TEXT,
    network_protocol_version TEXT,
    host_name TEXT,
    host_arch TEXT,
    os_type TEXT,
    os_version TEXT,
    process_pid INTEGER,
    process_executable_name TEXT,
    telemetry_sdk_name TEXT,
    telemetry_sdk_language TEXT,
    telemetry_sdk_version TEXT,
    scope_name TEXT,
    scope_version TEXT,

    attributes TEXT NOT NULL DEFAULT '{}',
    trace_source TEXT NOT NULL CHECK(trace_source IN ('ebpf', 'http', 'scheduler')),
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_spans_trace_id ON spans(trace_id);
CREATE INDEX IF NOT EXISTS idx_spans_start_time ON spans(start_time DESC);
CREATE INDEX IF NOT EXISTS idx_spans_service_name ON spans(service_name, start_time DESC);
CREATE INDEX IF NOT EXISTS idx_spans_trace_source ON spans(trace_source);
"#;
