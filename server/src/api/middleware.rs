//! HTTP middleware (404 handler)

use axum::extract::Request;
use axum::http::header;
use axum::response::IntoResponse;

use super::types::ApiError;

/// Handle unknown routes with the standard error body
pub async fn handle_404(req: Request) -> impl IntoResponse {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::debug!(
        method = %req.method(),
        uri = %req.uri(),
        content_type,
        "[404] No route"
    );

    ApiError::not_found(
        "NOT_FOUND",
        format!("No route for {} {}", req.method(), req.uri().path()),
    )
}
