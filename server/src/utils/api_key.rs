//! Ingestion credential extraction
//!
//! Agents send the key either in a dedicated `X-API-Key` header or as the
//! token of an `Authorization: Bearer` header.

use axum::http::{HeaderMap, header};

use crate::core::constants::API_KEY_HEADER;

/// Extract the bearer token from an `Authorization` header value
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Extract the presented API key from request headers.
///
/// The dedicated header wins when both forms are present.
pub fn extract_api_key(headers: &HeaderMap) -> Option<&str> {
    let dedicated = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|k| !k.is_empty());

    dedicated.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(extract_bearer_token)
    })
}
