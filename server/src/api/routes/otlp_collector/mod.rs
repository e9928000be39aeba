//! OpenTelemetry Protocol (OTLP) HTTP trace ingestion
//!
//! The collector root and the standard OTLP/HTTP signal path resolve to the
//! same handler:
//!
//! - `POST /api/traces/otlp`
//! - `POST /api/traces/otlp/v1/traces`

mod encoding;
mod traces;

use std::sync::Arc;

use axum::Router;
use axum::routing::post;

use crate::core::constants::INGEST_SIGNAL_SUFFIX;
use crate::domain::TracePipeline;

#[derive(Clone)]
pub struct OtlpState {
    pub pipeline: Arc<TracePipeline>,
}

pub fn routes(pipeline: Arc<TracePipeline>) -> Router {
    let state = OtlpState { pipeline };

    Router::new()
        .route("/", post(traces::export))
        .route(INGEST_SIGNAL_SUFFIX, post(traces::export))
        .with_state(state)
}
