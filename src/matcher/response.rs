//! # Response Formatting
//!
//! JSON bodies written by the vulnerability report endpoint.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use serde::{Deserialize, Serialize};

const APPLICATION_JSON: &str = "application/json";

/// Error body for every non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Write `resp` as a JSON error body with `status`.
///
/// Never panics. If the body cannot be encoded the status is kept and the
/// message is sent as plain text.
pub fn json_error(resp: ErrorResponse, status: StatusCode) -> Response {
    match serde_json::to_vec(&resp) {
        Ok(mut bytes) => {
            bytes.push(b'\n');
            with_body(status, APPLICATION_JSON, bytes)
        }
        Err(_) => with_body(status, "text/plain; charset=utf-8", resp.message.into_bytes()),
    }
}

/// Encode `value` as a complete JSON document.
///
/// The document is fully buffered, so a failure here leaves no bytes on the
/// wire and the caller can still pick the status.
pub fn encode_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut bytes = serde_json::to_vec(value)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// 200 response carrying an already encoded JSON document
pub fn json_ok(bytes: Vec<u8>) -> Response {
    with_body(StatusCode::OK, APPLICATION_JSON, bytes)
}

fn with_body(status: StatusCode, content_type: &'static str, bytes: Vec<u8>) -> Response {
    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_response_serialization() {
        let resp = ErrorResponse::new("not-found", "gone");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, json!({"code": "not-found", "message": "gone"}));
    }

    #[test]
    fn test_json_error_sets_status_and_content_type() {
        let response = json_error(
            ErrorResponse::new("bad-request", "nope"),
            StatusCode::BAD_REQUEST,
        );
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            APPLICATION_JSON
        );
    }

    #[test]
    fn test_encode_json_ends_with_newline() {
        let bytes = encode_json(&json!({"a": 1})).unwrap();
        assert_eq!(bytes, b"{\"a\":1}\n");
    }
}
