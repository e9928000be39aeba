//! API server initialization

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::decompression::RequestDecompressionLayer;
use tower_http::trace::TraceLayer;

use super::auth::{IngestGateState, ingest_gate_middleware};
use super::middleware;
use super::routes::{health, otlp_collector};
use crate::core::constants::{DEFAULT_BODY_LIMIT, INGEST_BASE_PATH, OTLP_BODY_LIMIT};
use crate::core::{CoreApp, DataSubdir};
use crate::domain::TracePipeline;

pub struct ApiServer {
    app: CoreApp,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        Self { app }
    }

    /// Returns CoreApp for graceful shutdown
    pub async fn start(self) -> Result<CoreApp> {
        let app = self.app;
        let shutdown = app.shutdown.clone();

        let host = app.config.server.host.clone();
        let port = app.config.server.port;
        let addr = SocketAddr::new(host.parse()?, port);

        // Debug directory is created by AppStorage when debug mode is on
        let mut pipeline = TracePipeline::new(app.database.clone());
        if app.config.debug {
            pipeline = pipeline.with_debug_path(app.storage.subdir(DataSubdir::Debug));
        }

        let router = build_router(Arc::new(pipeline), IngestGateState::new(&app.config.ingest));

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(
            "Listening on http://{addr} (OTLP traces at {INGEST_BASE_PATH})"
        );

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown.wait())
        .await?;

        Ok(app)
    }
}

/// Build the full HTTP router
pub fn build_router(pipeline: Arc<TracePipeline>, gate: IngestGateState) -> Router {
    // Gate runs before the body is buffered or decompressed
    let otlp_routes = otlp_collector::routes(pipeline)
        .layer(RequestDecompressionLayer::new())
        .layer(DefaultBodyLimit::max(OTLP_BODY_LIMIT))
        .layer(axum::middleware::from_fn_with_state(
            gate,
            ingest_gate_middleware,
        ));

    Router::new()
        .route("/api/v1/health", get(health::health))
        .nest(INGEST_BASE_PATH, otlp_routes)
        .fallback(middleware::handle_404)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use opentelemetry_proto::tonic::collector::trace::v1::ExportTraceServiceRequest;
    use opentelemetry_proto::tonic::common::v1::{AnyValue, KeyValue, any_value};
    use opentelemetry_proto::tonic::resource::v1::Resource;
    use opentelemetry_proto::tonic::trace::v1::{ResourceSpans, ScopeSpans, Span, Status};
    use prost::Message;
    use serde_json::{Value, json};
    use sqlx::Row;
    use tower::ServiceExt;

    use crate::core::constants::API_KEY_HEADER;
    use crate::data::SqliteService;

    const KEY: &str = "test-ingest-key";

    struct Harness {
        router: Router,
        db: Arc<SqliteService>,
    }

    async fn harness_with(enabled: bool, api_key: Option<&str>) -> Harness {
        let db = Arc::new(SqliteService::in_memory().await);
        let pipeline = Arc::new(TracePipeline::new(db.clone()));
        let gate = IngestGateState {
            enabled,
            api_key: api_key.map(Arc::from),
        };
        Harness {
            router: build_router(pipeline, gate),
            db,
        }
    }

    async fn harness() -> Harness {
        harness_with(true, Some(KEY)).await
    }

    fn json_request(uri: &str, body: &Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, KEY)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn protobuf_request(body: Vec<u8>) -> Request<Body> {
        Request::post("/api/traces/otlp/v1/traces")
            .header(header::CONTENT_TYPE, "application/x-protobuf")
            .header(header::AUTHORIZATION, format!("Bearer {KEY}"))
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn span_count(db: &SqliteService) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM spans")
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    fn text_batch() -> Value {
        json!({"resourceSpans": [{
            "resource": {"attributes": [
                {"key": "service.name", "value": {"stringValue": "checkout"}},
                {"key": "host.name", "value": {"stringValue": "node-7"}}
            ]},
            "scopeSpans": [{
                "scope": {"name": "ebpf-tracer", "version": "1.0.0"},
                "spans": [
                    {
                        "traceId": "5b8efff798038103d269b633813fc60c",
                        "spanId": "eee19b7ec3c1b174",
                        "name": "GET /cart",
                        "kind": 2,
                        "startTimeUnixNano": "1700000000000000000",
                        "endTimeUnixNano": "1700000000150000000",
                        "status": {"code": 1},
                        "attributes": [
                            {"key": "tags", "value": {"arrayValue": {"values": [
                                {"stringValue": "alpha"}, {"intValue": "3"}
                            ]}}},
                            {"key": "peer", "value": {"kvlistValue": {"values": [
                                {"key": "role", "value": {"stringValue": "edge"}}
                            ]}}},
                            {"key": "payload", "value": {"bytesValue": "hello"}},
                            {"key": "server.port", "value": {"intValue": "8443"}}
                        ]
                    },
                    {
                        "traceId": "5b8efff798038103d269b633813fc60c",
                        "spanId": "b7ad6b7169203331",
                        "parentSpanId": "eee19b7ec3c1b174",
                        "name": "SELECT carts",
                        "kind": 3,
                        "startTimeUnixNano": "1700000000010000000",
                        "endTimeUnixNano": "1700000000020000000"
                    }
                ]
            }]
        }]})
    }

    fn kv(key: &str, value: any_value::Value) -> KeyValue {
        KeyValue {
            key: key.to_string(),
            value: Some(AnyValue { value: Some(value) }),
        }
    }

    fn binary_batch() -> ExportTraceServiceRequest {
        ExportTraceServiceRequest {
            resource_spans: vec![ResourceSpans {
                resource: Some(Resource {
                    attributes: vec![kv(
                        "service.name",
                        any_value::Value::StringValue("inventory".to_string()),
                    )],
                    ..Default::default()
                }),
                scope_spans: vec![ScopeSpans {
                    spans: vec![
                        Span {
                            trace_id: vec![0x5b; 16],
                            span_id: vec![0xee; 8],
                            name: "reserve".to_string(),
                            kind: 2,
                            start_time_unix_nano: 1_700_000_000_000_000_000,
                            end_time_unix_nano: 1_700_000_000_150_000_000,
                            status: Some(Status {
                                code: 2,
                                message: "out of stock".to_string(),
                            }),
                            attributes: vec![kv(
                                "payload",
                                any_value::Value::BytesValue(b"hello".to_vec()),
                            )],
                            ..Default::default()
                        },
                        Span {
                            trace_id: vec![0x5b; 16],
                            span_id: vec![0xb7; 8],
                            parent_span_id: vec![0xee; 8],
                            name: "lookup".to_string(),
                            start_time_unix_nano: 1_700_000_000_010_000_000,
                            ..Default::default()
                        },
                    ],
                    ..Default::default()
                }],
                ..Default::default()
            }],
        }
    }

    // ========================================================================
    // Gate
    // ========================================================================

    #[tokio::test]
    async fn test_disabled_ingestion_returns_501() {
        let h = harness_with(false, Some(KEY)).await;
        let (status, body) = send(&h.router, json_request("/api/traces/otlp", &text_batch())).await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
        assert_eq!(body["code"], "INGESTION_DISABLED");
        assert_eq!(span_count(&h.db).await, 0);
    }

    #[tokio::test]
    async fn test_missing_key_is_unauthorized() {
        let h = harness().await;
        let request = Request::post("/api/traces/otlp")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(text_batch().to_string()))
            .unwrap();
        let (status, body) = send(&h.router, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "API_KEY_INVALID");
    }

    #[tokio::test]
    async fn test_wrong_key_is_unauthorized_in_both_forms() {
        let h = harness().await;
        for (name, value) in [
            (API_KEY_HEADER, "wrong".to_string()),
            ("authorization", "Bearer wrong".to_string()),
        ] {
            // Payload is not even valid: the gate runs first
            let request = Request::post("/api/traces/otlp")
                .header(name, value)
                .body(Body::from("garbage"))
                .unwrap();
            let (status, _) = send(&h.router, request).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_no_configured_key_rejects_everything() {
        let h = harness_with(true, None).await;
        let (status, _) = send(&h.router, json_request("/api/traces/otlp", &text_batch())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    // ========================================================================
    // Text batches
    // ========================================================================

    #[tokio::test]
    async fn test_text_batch_accepted_and_stored() {
        let h = harness().await;
        let (status, body) = send(&h.router, json_request("/api/traces/otlp", &text_batch())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"accepted": 2}));

        let row = sqlx::query(
            "SELECT trace_id, kind, status, duration_ms, service_name, host_name, server_port,
                    scope_name, scope_version, trace_source, attributes, parent_span_id
             FROM spans WHERE id = 'eee19b7ec3c1b174'",
        )
        .fetch_one(h.db.pool())
        .await
        .unwrap();

        assert_eq!(
            row.get::<String, _>("trace_id"),
            "5b8efff798038103d269b633813fc60c"
        );
        assert_eq!(row.get::<String, _>("kind"), "server");
        assert_eq!(row.get::<String, _>("status"), "ok");
        assert_eq!(row.get::<i64, _>("duration_ms"), 150);
        assert_eq!(row.get::<String, _>("service_name"), "checkout");
        assert_eq!(row.get::<String, _>("host_name"), "node-7");
        assert_eq!(row.get::<i64, _>("server_port"), 8443);
        assert_eq!(row.get::<String, _>("scope_name"), "ebpf-tracer");
        assert_eq!(row.get::<String, _>("scope_version"), "1.0.0");
        assert_eq!(row.get::<String, _>("trace_source"), "ebpf");
        assert_eq!(row.get::<Option<String>, _>("parent_span_id"), None);

        let attributes: Value =
            serde_json::from_str(&row.get::<String, _>("attributes")).unwrap();
        assert_eq!(attributes["tags"], json!(["alpha", 3]));
        assert_eq!(attributes["peer"], json!({"role": "edge"}));
        assert_eq!(attributes["payload"], "aGVsbG8=");
        assert_eq!(attributes["service.name"], "checkout");

        let child_parent: Option<String> =
            sqlx::query_scalar("SELECT parent_span_id FROM spans WHERE id = 'b7ad6b7169203331'")
                .fetch_one(h.db.pool())
                .await
                .unwrap();
        assert_eq!(child_parent.as_deref(), Some("eee19b7ec3c1b174"));
    }

    #[tokio::test]
    async fn test_both_paths_reach_the_same_handler() {
        let h = harness().await;
        let empty = json!({"resourceSpans": []});
        for uri in ["/api/traces/otlp", "/api/traces/otlp/v1/traces"] {
            let (status, body) = send(&h.router, json_request(uri, &empty)).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body, json!({"accepted": 0}));
        }
    }

    #[tokio::test]
    async fn test_missing_resource_spans_is_bad_request() {
        let h = harness().await;
        let (status, body) =
            send(&h.router, json_request("/api/traces/otlp", &json!({"spans": []}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_PAYLOAD");
        assert!(body["message"].as_str().unwrap().contains("resourceSpans"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        let h = harness().await;
        let request = Request::post("/api/traces/otlp")
            .header(header::CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, KEY)
            .body(Body::from("{nope"))
            .unwrap();
        let (status, body) = send(&h.router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "DECODE_FAILED");
    }

    #[tokio::test]
    async fn test_reingesting_same_span_keeps_one_row() {
        let h = harness().await;
        for _ in 0..2 {
            let (status, _) =
                send(&h.router, json_request("/api/traces/otlp", &text_batch())).await;
            assert_eq!(status, StatusCode::OK);
        }
        assert_eq!(span_count(&h.db).await, 2);
    }

    #[tokio::test]
    async fn test_gzip_body_is_decompressed() {
        let h = harness().await;
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(text_batch().to_string().as_bytes())
            .unwrap();
        let compressed = encoder.finish().unwrap();

        let request = Request::post("/api/traces/otlp/v1/traces")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_ENCODING, "gzip")
            .header(API_KEY_HEADER, KEY)
            .body(Body::from(compressed))
            .unwrap();
        let (status, body) = send(&h.router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["accepted"], 2);
    }

    // ========================================================================
    // Binary batches
    // ========================================================================

    #[tokio::test]
    async fn test_binary_batch_accepted_and_stored() {
        let h = harness().await;
        let (status, body) =
            send(&h.router, protobuf_request(binary_batch().encode_to_vec())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"accepted": 2}));

        let row = sqlx::query(
            "SELECT trace_id, kind, status, status_message, duration_ms, service_name,
                    trace_source, attributes
             FROM spans WHERE id = 'eeeeeeeeeeeeeeee'",
        )
        .fetch_one(h.db.pool())
        .await
        .unwrap();

        assert_eq!(row.get::<String, _>("trace_id"), "5b".repeat(16));
        assert_eq!(row.get::<String, _>("kind"), "server");
        assert_eq!(row.get::<String, _>("status"), "error");
        assert_eq!(row.get::<String, _>("status_message"), "out of stock");
        assert_eq!(row.get::<i64, _>("duration_ms"), 150);
        assert_eq!(row.get::<String, _>("service_name"), "inventory");
        assert_eq!(row.get::<String, _>("trace_source"), "ebpf");
        let attributes: Value =
            serde_json::from_str(&row.get::<String, _>("attributes")).unwrap();
        assert_eq!(attributes["payload"], "aGVsbG8=");

        // Span without end time
        let row = sqlx::query(
            "SELECT parent_span_id, end_time, duration_ms FROM spans WHERE id = 'b7b7b7b7b7b7b7b7'",
        )
        .fetch_one(h.db.pool())
        .await
        .unwrap();
        assert_eq!(
            row.get::<Option<String>, _>("parent_span_id").as_deref(),
            Some("eeeeeeeeeeeeeeee")
        );
        assert_eq!(row.get::<Option<String>, _>("end_time"), None);
        assert_eq!(row.get::<Option<i64>, _>("duration_ms"), None);
    }

    #[tokio::test]
    async fn test_empty_binary_batch() {
        let h = harness().await;
        let (status, body) = send(&h.router, protobuf_request(Vec::new())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"accepted": 0}));

        let empty = ExportTraceServiceRequest {
            resource_spans: vec![],
        };
        let (status, body) = send(&h.router, protobuf_request(empty.encode_to_vec())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"accepted": 0}));
    }

    #[tokio::test]
    async fn test_missing_content_type_means_protobuf() {
        let h = harness().await;
        let request = Request::post("/api/traces/otlp")
            .header(API_KEY_HEADER, KEY)
            .body(Body::from(binary_batch().encode_to_vec()))
            .unwrap();
        let (status, body) = send(&h.router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["accepted"], 2);
    }

    #[tokio::test]
    async fn test_truncated_protobuf_is_bad_request() {
        let h = harness().await;
        let (status, body) = send(&h.router, protobuf_request(vec![0x0a, 0x05, 0x01])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "DECODE_FAILED");
    }

    // ========================================================================
    // Other routes
    // ========================================================================

    #[tokio::test]
    async fn test_health() {
        let h = harness_with(false, None).await;
        let request = Request::get("/api/v1/health").body(Body::empty()).unwrap();
        let (status, body) = send(&h.router, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let h = harness().await;
        let request = Request::get("/nope").body(Body::empty()).unwrap();
        let (status, body) = send(&h.router, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }
}
