//! Authentication module

pub mod api_key;

// Ingest gate (for OTLP ingestion routes)
pub use api_key::{IngestGateError, IngestGateState, ingest_gate_middleware};
