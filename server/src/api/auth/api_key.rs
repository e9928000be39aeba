//! Ingest gate: enablement switch and shared API key check
//!
//! Runs before the body is read. Keys may arrive as `X-API-Key: <key>` or
//! `Authorization: Bearer <key>`; both forms are equivalent.

use std::fmt;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::types::ApiError;
use crate::core::IngestConfig;
use crate::utils::api_key::extract_api_key;
use crate::utils::crypto::constant_time_eq;

/// Ingest gate rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestGateError {
    /// Ingestion switched off in config
    Disabled,
    /// No key configured on the server (fail closed)
    NotConfigured,
    /// Request carried no credential
    Missing,
    /// Credential does not match
    InvalidKey,
}

impl fmt::Display for IngestGateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "Trace ingestion is not enabled"),
            Self::NotConfigured => write!(f, "No ingest API key configured"),
            Self::Missing => write!(f, "API key required"),
            Self::InvalidKey => write!(f, "Invalid API key"),
        }
    }
}

impl IntoResponse for IngestGateError {
    fn into_response(self) -> Response {
        match self {
            IngestGateError::Disabled => {
                ApiError::not_implemented("INGESTION_DISABLED", self.to_string()).into_response()
            }
            // Same body for every credential failure
            _ => ApiError::unauthorized("API_KEY_INVALID", "Invalid or missing API key")
                .into_response(),
        }
    }
}

/// State for the ingest gate middleware
#[derive(Clone)]
pub struct IngestGateState {
    pub enabled: bool,
    pub api_key: Option<Arc<str>>,
}

impl IngestGateState {
    pub fn new(config: &IngestConfig) -> Self {
        Self {
            enabled: config.enabled,
            api_key: config.api_key.as_deref().map(Arc::from),
        }
    }

    /// Decide whether a request with these headers may proceed
    pub fn check(&self, headers: &axum::http::HeaderMap) -> Result<(), IngestGateError> {
        if !self.enabled {
            return Err(IngestGateError::Disabled);
        }
        let expected = self
            .api_key
            .as_deref()
            .ok_or(IngestGateError::NotConfigured)?;
        let presented = extract_api_key(headers).ok_or(IngestGateError::Missing)?;

        if constant_time_eq(presented, expected) {
            Ok(())
        } else {
            Err(IngestGateError::InvalidKey)
        }
    }
}

/// Ingest gate middleware
pub async fn ingest_gate_middleware(
    State(state): State<IngestGateState>,
    request: Request,
    next: Next,
) -> Result<Response, IngestGateError> {
    if let Err(e) = state.check(request.headers()) {
        match e {
            IngestGateError::NotConfigured => {
                tracing::warn!(uri = %request.uri(), "Rejected ingest request: {}", e)
            }
            _ => tracing::debug!(uri = %request.uri(), "Rejected ingest request: {}", e),
        }
        return Err(e);
    }

    Ok(next.run(request).await)
}
