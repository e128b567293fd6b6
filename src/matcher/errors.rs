//! # Matcher Errors
//!
//! Error types for the vulnerability report endpoint.
//!
//! `MatchError` is what a [`MatchService`](super::MatchService) returns.
//! `HandlerError` is what the endpoint turns every failure into before a
//! response is written.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::response::{json_error, ErrorResponse};

/// Result type for lookup operations
pub type MatchResult<T> = Result<T, MatchError>;

/// Errors reported by a lookup service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// No index report exists for the manifest
    #[error("index report for manifest {0} not found")]
    IndexReportNotFound(String),

    /// The request context was cancelled before the lookup finished
    #[error("match cancelled")]
    Cancelled,

    /// The server gave up waiting for the lookup
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// Backing store could not be read
    #[error("store error: {0}")]
    Store(String),

    /// Any other failure inside the lookup service
    #[error("{0}")]
    Internal(String),
}

impl MatchError {
    /// True for the one condition the endpoint reports as 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, MatchError::IndexReportNotFound(_))
    }
}

/// Failures of the vulnerability report endpoint
#[derive(Debug, Error)]
pub enum HandlerError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Request used a method other than GET
    #[error("endpoint only allows GET")]
    MethodNotAllowed,

    /// Path did not carry a manifest hash
    #[error("malformed path. provide a single manifest hash")]
    BadRequest,

    /// Lookup service has no report for the manifest
    #[error("index report for manifest {0} not found")]
    NotFound(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Lookup service failed
    #[error("failed to start scan: {0}")]
    Match(MatchError),

    /// Report could not be encoded as JSON
    #[error("failed to encode vulnerability report: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl HandlerError {
    /// Translate a lookup failure for `manifest_hash`.
    pub fn from_match(err: MatchError, manifest_hash: &str) -> Self {
        if err.is_not_found() {
            HandlerError::NotFound(manifest_hash.to_string())
        } else {
            HandlerError::Match(err)
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            HandlerError::BadRequest => StatusCode::BAD_REQUEST,
            HandlerError::NotFound(_) => StatusCode::NOT_FOUND,
            HandlerError::Match(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HandlerError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine readable error code
    pub fn code(&self) -> &'static str {
        match self {
            HandlerError::MethodNotAllowed => "method-not-allowed",
            HandlerError::BadRequest => "bad-request",
            HandlerError::NotFound(_) => "not-found",
            HandlerError::Match(_) => "match-error",
            HandlerError::Encoding(_) => "encoding-error",
        }
    }
}

impl From<&HandlerError> for ErrorResponse {
    fn from(err: &HandlerError) -> Self {
        ErrorResponse::new(err.code(), err.to_string())
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let mut response = json_error(ErrorResponse::from(&self), self.status_code());
        if let HandlerError::MethodNotAllowed = self {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("GET"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            HandlerError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(HandlerError::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            HandlerError::NotFound("x".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            HandlerError::Match(MatchError::Cancelled).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_translation_uses_requested_hash() {
        let err = HandlerError::from_match(
            MatchError::IndexReportNotFound("other".to_string()),
            "sha256:abc123",
        );
        assert_eq!(err.code(), "not-found");
        assert_eq!(
            err.to_string(),
            "index report for manifest sha256:abc123 not found"
        );
    }

    #[test]
    fn test_other_errors_become_match_error() {
        let err = HandlerError::from_match(MatchError::Store("disk gone".to_string()), "m");
        assert_eq!(err.code(), "match-error");
        assert_eq!(err.to_string(), "failed to start scan: store error: disk gone");

        let err = HandlerError::from_match(MatchError::Cancelled, "m");
        assert_eq!(err.code(), "match-error");

        let err = HandlerError::from_match(MatchError::DeadlineExceeded, "m");
        assert_eq!(err.to_string(), "failed to start scan: deadline exceeded");
    }

    #[test]
    fn test_is_not_found() {
        assert!(MatchError::IndexReportNotFound("m".to_string()).is_not_found());
        assert!(!MatchError::Internal("boom".to_string()).is_not_found());
    }

    #[test]
    fn test_method_not_allowed_sets_allow_header() {
        let response = HandlerError::MethodNotAllowed.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers().get(header::ALLOW).unwrap(), "GET");
    }
}
