//! Repository traits for database backends
//!
//! The ingestion pipeline depends on these traits rather than on a concrete
//! backend, so handlers can be exercised against any implementation.

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::types::NormalizedSpan;

// ============================================================================
// Span Repository Trait
// ============================================================================

/// Write contract for normalized spans
#[async_trait]
pub trait SpanRepository: Send + Sync {
    /// Upsert a batch keyed on span id, inside one transaction.
    ///
    /// Returns the number of rows committed. On error nothing from the
    /// batch is committed.
    async fn upsert_spans(&self, spans: &[NormalizedSpan]) -> Result<u64, DataError>;
}
