//! Well-known semantic-convention columns
//!
//! Copies a fixed set of attribute keys out of the merged attribute map into
//! typed columns. Keys are not removed from the map.

use serde_json::{Map, Value as JsonValue};

use super::model::InstrumentationScope;
use crate::data::SemconvColumns;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    ServiceNamespace,
    ServiceInstanceId,
    ServiceVersion,
    DeploymentEnvironment,
    ContainerId,
    ContainerName,
    K8sNamespace,
    K8sPodName,
    K8sContainerName,
    ServerAddress,
    ServerPort,
    ClientAddress,
    ClientPort,
    UrlFull,
    UrlScheme,
    UrlPath,
    NetworkTransport,
    NetworkProtocolName,
    NetworkProtocolVersion,
    HostName,
    HostArch,
    OsType,
    OsVersion,
    ProcessPid,
    ProcessExecutableName,
    TelemetrySdkName,
    TelemetrySdkLanguage,
    TelemetrySdkVersion,
    ScopeName,
    ScopeVersion,
}

/// Attribute key to column, in lookup order.
/// A column fed by several keys takes the first one present.
pub const COLUMN_KEYS: &[(&str, Column)] = &[
    ("service.namespace", Column::ServiceNamespace),
    ("service.instance.id", Column::ServiceInstanceId),
    ("service.version", Column::ServiceVersion),
    ("deployment.environment.name", Column::DeploymentEnvironment),
    ("deployment.environment", Column::DeploymentEnvironment),
    ("container.id", Column::ContainerId),
    ("container.name", Column::ContainerName),
    ("k8s.namespace.name", Column::K8sNamespace),
    ("k8s.pod.name", Column::K8sPodName),
    ("k8s.container.name", Column::K8sContainerName),
    ("server.address", Column::ServerAddress),
    ("server.port", Column::ServerPort),
    ("client.address", Column::ClientAddress),
    ("client.port", Column::ClientPort),
    ("url.full", Column::UrlFull),
    ("url.scheme", Column::UrlScheme),
    ("url.path", Column::UrlPath),
    ("network.transport", Column::NetworkTransport),
    ("network.protocol.name", Column::NetworkProtocolName),
    ("network.protocol.version", Column::NetworkProtocolVersion),
    ("host.name", Column::HostName),
    ("host.arch", Column::HostArch),
    ("os.type", Column::OsType),
    ("os.version", Column::OsVersion),
    ("process.pid", Column::ProcessPid),
    ("process.executable.name", Column::ProcessExecutableName),
    ("telemetry.sdk.name", Column::TelemetrySdkName),
    ("telemetry.sdk.language", Column::TelemetrySdkLanguage),
    ("telemetry.sdk.version", Column::TelemetrySdkVersion),
    ("otel.scope.name", Column::ScopeName),
    ("otel.scope.version", Column::ScopeVersion),
];

enum Slot<'a> {
    Text(&'a mut Option<String>),
    Int(&'a mut Option<i64>),
}

impl Column {
    fn slot(self, c: &mut SemconvColumns) -> Slot<'_> {
        match self {
            Column::ServiceNamespace => Slot::Text(&mut c.service_namespace),
            Column::ServiceInstanceId => Slot::Text(&mut c.service_instance_id),
            Column::ServiceVersion => Slot::Text(&mut c.service_version),
            Column::DeploymentEnvironment => Slot::Text(&mut c.deployment_environment),
            Column::ContainerId => Slot::Text(&mut c.container_id),
            Column::ContainerName => Slot::Text(&mut c.container_name),
            Column::K8sNamespace => Slot::Text(&mut c.k8s_namespace),
            Column::K8sPodName => Slot::Text(&mut c.k8s_pod_name),
            Column::K8sContainerName => Slot::Text(&mut c.k8s_container_name),
            Column::ServerAddress => Slot::Text(&mut c.server_address),
            Column::ServerPort => Slot::Int(&mut c.server_port),
            Column::ClientAddress => Slot::Text(&mut c.client_address),
            Column::ClientPort => Slot::Int(&mut c.client_port),
            Column::UrlFull => Slot::Text(&mut c.url_full),
            Column::UrlScheme => Slot::Text(&mut c.url_scheme),
            Column::UrlPath => Slot::Text(&mut c.url_path),
            Column::NetworkTransport => Slot::Text(&mut c.network_transport),
            Column::NetworkProtocolName => Slot::Text(&mut c.network_protocol_name),
            Column::NetworkProtocolVersion => Slot::Text(&mut c.network_protocol_version),
            Column::HostName => Slot::Text(&mut c.host_name),
            Column::HostArch => Slot::Text(&mut c.host_arch),
            Column::OsType => Slot::Text(&mut c.os_type),
            Column::OsVersion => Slot::Text(&mut c.os_version),
            Column::ProcessPid => Slot::Int(&mut c.process_pid),
            Column::ProcessExecutableName => Slot::Text(&mut c.process_executable_name),
            Column::TelemetrySdkName => Slot::Text(&mut c.telemetry_sdk_name),
            Column::TelemetrySdkLanguage => Slot::Text(&mut c.telemetry_sdk_language),
            Column::TelemetrySdkVersion => Slot::Text(&mut c.telemetry_sdk_version),
            Column::ScopeName => Slot::Text(&mut c.scope_name),
            Column::ScopeVersion => Slot::Text(&mut c.scope_version),
        }
    }
}

fn as_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) if !s.is_empty() => Some(s.clone()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_int(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(n) => n.as_i64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Fill the well-known columns from merged attributes.
/// `scope` supplies scope name/version when the attributes do not.
pub fn extract_columns(
    attributes: &Map<String, JsonValue>,
    scope: Option<&InstrumentationScope>,
) -> SemconvColumns {
    let mut columns = SemconvColumns::default();

    for (key, column) in COLUMN_KEYS {
        let Some(value) = attributes.get(*key) else {
            continue;
        };
        match column.slot(&mut columns) {
            Slot::Text(dst) if dst.is_none() => *dst = as_text(value),
            Slot::Int(dst) if dst.is_none() => *dst = as_int(value),
            _ => {}
        }
    }

    if let Some(scope) = scope {
        if columns.scope_name.is_none() {
            columns.scope_name = scope.name.clone();
        }
        if columns.scope_version.is_none() {
            columns.scope_version = scope.version.clone();
        }
    }

    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: JsonValue) -> Map<String, JsonValue> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_table_covers_every_column_once() {
        let mut seen: Vec<Column> = COLUMN_KEYS.iter().map(|(_, c)| *c).collect();
        seen.dedup();
        assert_eq!(seen.len(), 30);
    }

    #[test]
    fn test_text_and_int_columns() {
        let columns = extract_columns(
            &attrs(json!({
                "service.version": "1.4.0",
                "server.address": "db.internal",
                "server.port": 5432,
                "client.port": "40123",
                "process.pid": 99,
                "url.path": "/v1/orders",
                "host.name": "node-1",
            })),
            None,
        );

        assert_eq!(columns.service_version.as_deref(), Some("1.4.0"));
        assert_eq!(columns.server_address.as_deref(), Some("db.internal"));
        assert_eq!(columns.server_port, Some(5432));
        assert_eq!(columns.client_port, Some(40123));
        assert_eq!(columns.process_pid, Some(99));
        assert_eq!(columns.url_path.as_deref(), Some("/v1/orders"));
        assert_eq!(columns.host_name.as_deref(), Some("node-1"));
        assert_eq!(columns.container_id, None);
    }

    #[test]
    fn test_text_column_stringifies_scalars() {
        let columns = extract_columns(
            &attrs(json!({
                "network.protocol.version": 2,
                "os.version": true,
                "host.arch": ["amd64"],
                "url.scheme": {"a": 1},
            })),
            None,
        );
        assert_eq!(columns.network_protocol_version.as_deref(), Some("2"));
        assert_eq!(columns.os_version.as_deref(), Some("true"));
        assert_eq!(columns.host_arch, None);
        assert_eq!(columns.url_scheme, None);
    }

    #[test]
    fn test_int_column_rejects_non_integers() {
        let columns = extract_columns(
            &attrs(json!({"server.port": "http", "client.port": 1.5})),
            None,
        );
        assert_eq!(columns.server_port, None);
        assert_eq!(columns.client_port, None);
    }

    #[test]
    fn test_first_key_wins_for_shared_column() {
        let columns = extract_columns(
            &attrs(json!({
                "deployment.environment": "legacy",
                "deployment.environment.name": "prod",
            })),
            None,
        );
        assert_eq!(columns.deployment_environment.as_deref(), Some("prod"));

        let columns = extract_columns(&attrs(json!({"deployment.environment": "staging"})), None);
        assert_eq!(columns.deployment_environment.as_deref(), Some("staging"));
    }

    #[test]
    fn test_scope_fallback() {
        let scope = InstrumentationScope {
            name: Some("io.opentelemetry.ebpf".into()),
            version: Some("0.9".into()),
        };

        let columns = extract_columns(&Map::new(), Some(&scope));
        assert_eq!(columns.scope_name.as_deref(), Some("io.opentelemetry.ebpf"));
        assert_eq!(columns.scope_version.as_deref(), Some("0.9"));

        let columns = extract_columns(&attrs(json!({"otel.scope.name": "override"})), Some(&scope));
        assert_eq!(columns.scope_name.as_deref(), Some("override"));
        assert_eq!(columns.scope_version.as_deref(), Some("0.9"));
    }
}
