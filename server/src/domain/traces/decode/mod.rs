//! OTLP wire decoding
//!
//! Turns a request body into an [`ExportRequest`]. The binary path goes
//! through the generated protobuf types; the text path walks the JSON tree
//! directly so it can accept both proto3-JSON and snake_case field names.

mod json;
mod protobuf;

use thiserror::Error;

use super::model::ExportRequest;

/// Wire encoding of an export request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    Protobuf,
    Json,
}

impl WireFormat {
    /// Pick the format from a Content-Type value.
    /// Anything that is not `application/json` is treated as protobuf.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        match content_type {
            Some(ct) if ct.trim_start().starts_with("application/json") => WireFormat::Json,
            _ => WireFormat::Protobuf,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WireFormat::Protobuf => "protobuf",
            WireFormat::Json => "json",
        }
    }
}

/// Body bytes could not be parsed in the declared format
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    #[error("Failed to decode protobuf request: {0}")]
    Protobuf(String),
    #[error("Failed to decode JSON request: {0}")]
    Json(String),
}

/// Body parsed but does not have the OTLP export shape
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum WireError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Decode a request body in the given wire format
pub fn decode(body: &[u8], format: WireFormat) -> Result<ExportRequest, WireError> {
    match format {
        WireFormat::Protobuf => Ok(protobuf::decode(body)?),
        WireFormat::Json => json::decode(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_from_content_type() {
        assert_eq!(
            WireFormat::from_content_type(Some("application/json")),
            WireFormat::Json
        );
        assert_eq!(
            WireFormat::from_content_type(Some("application/json; charset=utf-8")),
            WireFormat::Json
        );
        assert_eq!(
            WireFormat::from_content_type(Some("application/x-protobuf")),
            WireFormat::Protobuf
        );
        assert_eq!(
            WireFormat::from_content_type(Some("text/plain")),
            WireFormat::Protobuf
        );
        assert_eq!(WireFormat::from_content_type(None), WireFormat::Protobuf);
    }

    #[test]
    fn test_decode_dispatches_on_format() {
        let json = br#"{"resourceSpans":[]}"#;
        assert!(decode(json, WireFormat::Json).is_ok());

        // Field 1, length 5, one byte of payload
        let truncated = [0x0a, 0x05, 0x01];
        assert!(matches!(
            decode(&truncated, WireFormat::Protobuf),
            Err(WireError::Decode(DecodeError::Protobuf(_)))
        ));
        assert!(matches!(
            decode(&truncated, WireFormat::Json),
            Err(WireError::Decode(DecodeError::Json(_)))
        ));
    }
}
