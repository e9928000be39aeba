//! Traces export endpoint

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use serde::Serialize;

use super::OtlpState;
use super::encoding::wire_format;
use crate::api::types::ApiError;

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    /// Spans written by this request
    pub accepted: u64,
}

pub async fn export(
    State(state): State<OtlpState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ExportResponse>, ApiError> {
    let format = wire_format(&headers);
    let accepted = state.pipeline.ingest(&body, format).await?;
    Ok(Json(ExportResponse { accepted }))
}
