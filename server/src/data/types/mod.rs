//! Shared data types for the storage layer

mod enums;
mod normalized;

pub use enums::{SpanKind, SpanStatus, TraceSource};
pub use normalized::{NormalizedSpan, SemconvColumns};
