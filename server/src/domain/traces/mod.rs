//! Trace ingestion and normalization
//!
//! - `decode` - Wire decoding (protobuf and JSON) into the export model
//! - `attributes` - `AnyValue` to JSON value decoding
//! - `ids` - Trace/span id canonicalization
//! - `semconv` - Well-known attribute columns
//! - `normalize` - Export tree to flat span rows
//! - `pipeline` - Decode, normalize, persist

mod attributes;
mod decode;
mod ids;
pub mod model;
mod normalize;
mod pipeline;
mod semconv;

pub use decode::{DecodeError, ValidationError, WireError, WireFormat, decode};
pub use normalize::normalize;
pub use pipeline::{IngestError, TracePipeline};
