//! Data storage layer
//!
//! - `sqlite` - Embedded span store (schema, migrations, repositories)
//! - `types` - Normalized span rows and canonical enums
//! - `traits` - Repository traits the API layer depends on
//! - `error` - Unified error type for the data layer

pub mod error;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use error::DataError;
pub use sqlite::SqliteService;
pub use traits::SpanRepository;
pub use types::{NormalizedSpan, SemconvColumns, SpanKind, SpanStatus, TraceSource};
