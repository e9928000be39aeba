//! Trace ingestion pipeline
//!
//! ```text
//! body ──▶ decode ──▶ normalize ──▶ upsert ──▶ accepted count
//!          (wire)     (rows)        (one tx)
//! ```
//!
//! | Stage     | Input            | Output                | Module        |
//! |-----------|------------------|-----------------------|---------------|
//! | Decode    | `&[u8]`          | `ExportRequest`       | `decode/`     |
//! | Normalize | `&ExportRequest` | `Vec<NormalizedSpan>` | `normalize.rs`|
//! | Persist   | `&[NormalizedSpan]` | `u64`              | `data::sqlite`|

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use super::decode::{DecodeError, ValidationError, WireError, WireFormat, decode};
use super::normalize::normalize;
use crate::core::constants::DEBUG_TRACES_FILE;
use crate::data::{DataError, SpanRepository};
use crate::utils::debug::write_debug;

/// Failure of a single ingest request
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to store spans: {0}")]
    Storage(#[from] DataError),
}

impl From<WireError> for IngestError {
    fn from(err: WireError) -> Self {
        match err {
            WireError::Decode(e) => IngestError::Decode(e),
            WireError::Validation(e) => IngestError::Validation(e),
        }
    }
}

/// Decode, normalize and persist one export request
pub struct TracePipeline {
    repository: Arc<dyn SpanRepository>,
    debug_path: Option<PathBuf>,
}

impl TracePipeline {
    pub fn new(repository: Arc<dyn SpanRepository>) -> Self {
        Self {
            repository,
            debug_path: None,
        }
    }

    /// Append every normalized batch to `traces.jsonl` under `path`
    pub fn with_debug_path(mut self, path: PathBuf) -> Self {
        self.debug_path = Some(path);
        self
    }

    /// Process one request body. Returns the number of spans written.
    ///
    /// A storage failure commits nothing from the batch.
    pub async fn ingest(&self, body: &[u8], format: WireFormat) -> Result<u64, IngestError> {
        let request = decode(body, format)?;
        let received = request.span_count();

        let spans = normalize(&request);
        let dropped = received - spans.len();

        if let Some(ref path) = self.debug_path {
            write_debug(path, DEBUG_TRACES_FILE, format.as_str(), &spans).await;
        }

        let accepted = self.repository.upsert_spans(&spans).await?;

        tracing::debug!(
            format = format.as_str(),
            received,
            dropped,
            accepted,
            "Ingested trace batch"
        );

        Ok(accepted)
    }
}
