//! SQLite repositories
//!
//! Row types should be imported from `crate::data::types`.

pub mod span;

pub use span::upsert_spans;
