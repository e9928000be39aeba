//! SpanRepository trait implementation for SQLite

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::traits::SpanRepository;
use crate::data::types::NormalizedSpan;

use super::SqliteService;
use super::repositories::span;

#[async_trait]
impl SpanRepository for SqliteService {
    async fn upsert_spans(&self, spans: &[NormalizedSpan]) -> Result<u64, DataError> {
        span::upsert_spans(self.pool(), spans)
            .await
            .map_err(Into::into)
    }
}
