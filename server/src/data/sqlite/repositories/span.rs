//! Span repository for SQLite operations

use std::sync::LazyLock;

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::NormalizedSpan;
use crate::utils::time::{nanos_to_iso, now_iso};

/// Column order shared by the INSERT list and the bind sequence in `upsert_spans`
const SPAN_COLUMNS: &[&str] = &[
    "id",
    "trace_id",
    "parent_span_id",
    "name",
    "kind",
    "status",
    "status_message",
    "start_time",
    "end_time",
    "duration_ms",
    "service_name",
    "service_namespace",
    "service_instance_id",
    "service_version",
    "deployment_environment",
    "container_id",
    "container_name",
    "k8s_namespace",
    "k8s_pod_name",
    "k8s_container_name",
    "server_address",
    "server_port",
    "client_address",
    "client_port",
    "url_full",
    "url_scheme",
    "url_path",
    "network_transport",
    "network_protocol_name",
    "network_protocol_version",
    "host_name",
    "host_arch",
    "os_type",
    "os_version",
    "process_pid",
    "process_executable_name",
    "telemetry_sdk_name",
    "telemetry_sdk_language",
    "telemetry_sdk_version",
    "scope_name",
    "scope_version",
    "attributes",
    "trace_source",
    "created_at",
];

static UPSERT_SQL: LazyLock<String> = LazyLock::new(|| {
    let placeholders = vec!["?"; SPAN_COLUMNS.len()].join(", ");
    let updates = SPAN_COLUMNS
        .iter()
        .filter(|c| **c != "id")
        .map(|c| format!("{c} = excluded.{c}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO spans ({}) VALUES ({}) ON CONFLICT(id) DO UPDATE SET {}",
        SPAN_COLUMNS.join(", "),
        placeholders,
        updates
    )
});

/// Upsert a batch of spans in a single transaction.
///
/// Rows are keyed on `id`; a repeated id overwrites every column of the
/// existing row. Returns the number of rows written. Nothing is committed
/// if any row fails.
pub async fn upsert_spans(pool: &SqlitePool, spans: &[NormalizedSpan]) -> Result<u64, SqliteError> {
    if spans.is_empty() {
        return Ok(0);
    }

    let created_at = now_iso();
    let mut tx = pool.begin().await?;
    let mut written = 0u64;

    for span in spans {
        let attributes = serde_json::to_string(&span.attributes)?;
        let c = &span.columns;

        let result = sqlx::query(UPSERT_SQL.as_str())
            .bind(&span.id)
            .bind(&span.trace_id)
            .bind(&span.parent_span_id)
            .bind(&span.name)
            .bind(span.kind.as_str())
            .bind(span.status.as_str())
            .bind(&span.status_message)
            .bind(nanos_to_iso(span.start_time_unix_nano))
            .bind(span.end_time_unix_nano.map(nanos_to_iso))
            .bind(span.duration_ms.and_then(|ms| i64::try_from(ms).ok()))
            .bind(&span.service_name)
            .bind(&c.service_namespace)
            .bind(&c.service_instance_id)
            .bind(&c.service_version)
            .bind(&c.deployment_environment)
            .bind(&c.container_id)
            .bind(&c.container_name)
            .bind(&c.k8s_namespace)
            .bind(&c.k8s_pod_name)
            .bind(&c.k8s_container_name)
            .bind(&c.server_address)
            .bind(c.server_port)
            .bind(&c.client_address)
            .bind(c.client_port)
            .bind(&c.url_full)
            .bind(&c.url_scheme)
            .bind(&c.url_path)
            .bind(&c.network_transport)
            .bind(&c.network_protocol_name)
            .bind(&c.network_protocol_version)
            .bind(&c.host_name)
            .bind(&c.host_arch)
            .bind(&c.os_type)
            .bind(&c.os_version)
            .bind(c.process_pid)
            .bind(&c.process_executable_name)
            .bind(&c.telemetry_sdk_name)
            .bind(&c.telemetry_sdk_language)
            .bind(&c.telemetry_sdk_version)
            .bind(&c.scope_name)
            .bind(&c.scope_version)
            .bind(attributes)
            .bind(span.trace_source.as_str())
            .bind(&created_at)
            .execute(&mut *tx)
            .await?;

        written += result.rows_affected();
    }

    tx.commit().await?;

    tracing::debug!(spans = spans.len(), written, "Upserted spans");
    Ok(written)
}
