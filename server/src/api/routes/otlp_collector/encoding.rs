//! OTLP content-type selection and ingest error mapping

use axum::http::{HeaderMap, header};

use crate::api::types::ApiError;
use crate::domain::{IngestError, WireFormat};

/// Wire format from the request's Content-Type.
/// Defaults to protobuf if content type is missing or unrecognized.
#[inline]
pub fn wire_format(headers: &HeaderMap) -> WireFormat {
    WireFormat::from_content_type(
        headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
    )
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Decode(e) => {
                tracing::debug!(error = %e, "Rejected undecodable trace payload");
                ApiError::bad_request("DECODE_FAILED", e.to_string())
            }
            IngestError::Validation(e) => {
                tracing::debug!(error = %e, "Rejected malformed trace payload");
                ApiError::bad_request("INVALID_PAYLOAD", e.message)
            }
            IngestError::Storage(e) => ApiError::from_data(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_wire_format_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(wire_format(&headers), WireFormat::Protobuf);

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert_eq!(wire_format(&headers), WireFormat::Json);

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-protobuf"),
        );
        assert_eq!(wire_format(&headers), WireFormat::Protobuf);
    }
}
