//! Domain logic for trace ingestion
//!
//! - `traces` - OTLP trace decoding, normalization and persistence pipeline

pub mod traces;

pub use traces::{IngestError, TracePipeline, WireFormat};
