//! Error bodies returned by the rides endpoints.
//!
//! Every failure is reported as `{"error_code": ..., "message": ...}`. The
//! HTTP status attached to that body is chosen by a [`StatusPolicy`], so the
//! same body can be served with the reference behavior (always 200) or with
//! conventional status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use rides_lib::Error as LibError;

/// Message returned for every store failure. The cause is only logged.
pub const SERVER_ERROR_MESSAGE: &str = "Unknown error";

/// Machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Caller input broke a documented constraint.
    ValidationError,
    /// The store failed; the cause is not exposed.
    ServerError,
    /// The query succeeded but matched nothing.
    RidesNotFoundError,
}

impl ErrorCode {
    /// Conventional HTTP status for this category.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::RidesNotFoundError => StatusCode::NOT_FOUND,
        }
    }

    /// Label used for metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::ServerError => "SERVER_ERROR",
            ErrorCode::RidesNotFoundError => "RIDES_NOT_FOUND_ERROR",
        }
    }
}

/// How error bodies map onto HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    /// Answer 200 for every outcome and let the body carry the error.
    #[default]
    Compat,
    /// Answer 400 / 404 / 500 according to [`ErrorCode::status`].
    Mapped,
}

impl StatusPolicy {
    /// Parse a policy name. Unknown values fall back to `Compat`.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "mapped" | "strict" => StatusPolicy::Mapped,
            _ => StatusPolicy::Compat,
        }
    }

    pub fn status_for(self, code: ErrorCode) -> StatusCode {
        match self {
            StatusPolicy::Compat => StatusCode::OK,
            StatusPolicy::Mapped => code.status(),
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error_code: ErrorCode,
    pub message: String,

    #[serde(skip)]
    policy: StatusPolicy,
}

impl ErrorResponse {
    pub fn new(error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error_code,
            message: message.into(),
            policy: StatusPolicy::default(),
        }
    }

    /// A `VALIDATION_ERROR` with the first failing rule's text.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// The generic `SERVER_ERROR`.
    pub fn server_error() -> Self {
        Self::new(ErrorCode::ServerError, SERVER_ERROR_MESSAGE)
    }

    /// The `RIDES_NOT_FOUND_ERROR` returned for empty results.
    pub fn rides_not_found() -> Self {
        Self::new(ErrorCode::RidesNotFoundError, LibError::RidesNotFound.to_string())
    }

    /// Choose the status policy used when this body becomes a response.
    pub fn with_policy(mut self, policy: StatusPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.policy.status_for(self.error_code)
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code.as_str(), self.message)
    }
}

impl std::error::Error for ErrorResponse {}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Convert library errors to error bodies.
///
/// Store failures collapse into [`ErrorResponse::server_error`]; callers are
/// expected to log the original error before converting it.
pub fn from_lib_error(error: &LibError) -> ErrorResponse {
    match error {
        LibError::Validation(rule) => ErrorResponse::validation(rule.to_string()),
        LibError::InvalidPagination => ErrorResponse::validation(error.to_string()),
        LibError::RidesNotFound => ErrorResponse::rides_not_found(),
        _ => ErrorResponse::server_error(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rides_lib::ValidationError;

    #[test]
    fn test_error_body_matches_wire_format() {
        let body = ErrorResponse::rides_not_found();
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(
            json,
            r#"{"error_code":"RIDES_NOT_FOUND_ERROR","message":"Could not find any rides"}"#
        );
    }

    #[test]
    fn test_server_error_hides_cause() {
        let error = LibError::StoreUnavailable {
            message: "disk I/O error".to_string(),
        };
        let body = from_lib_error(&error);
        assert_eq!(body.error_code, ErrorCode::ServerError);
        assert_eq!(body.message, "Unknown error");
        assert!(!serde_json::to_string(&body).unwrap().contains("disk"));
    }

    #[test]
    fn test_validation_error_carries_rule_text() {
        let body = from_lib_error(&LibError::Validation(ValidationError::DriverName));
        assert_eq!(body.error_code, ErrorCode::ValidationError);
        assert_eq!(body.message, "Driver name must be a non empty string");
    }

    #[test]
    fn test_invalid_pagination_is_validation_error() {
        let body = from_lib_error(&LibError::InvalidPagination);
        assert_eq!(body.error_code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_compat_policy_always_ok() {
        for code in [
            ErrorCode::ValidationError,
            ErrorCode::ServerError,
            ErrorCode::RidesNotFoundError,
        ] {
            assert_eq!(StatusPolicy::Compat.status_for(code), StatusCode::OK);
        }
    }

    #[test]
    fn test_mapped_policy_statuses() {
        let policy = StatusPolicy::Mapped;
        assert_eq!(
            policy.status_for(ErrorCode::ValidationError),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            policy.status_for(ErrorCode::RidesNotFoundError),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            policy.status_for(ErrorCode::ServerError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_status_policy_from_str() {
        assert_eq!(StatusPolicy::from_str("mapped"), StatusPolicy::Mapped);
        assert_eq!(StatusPolicy::from_str("STRICT"), StatusPolicy::Mapped);
        assert_eq!(StatusPolicy::from_str("compat"), StatusPolicy::Compat);
        assert_eq!(StatusPolicy::from_str("whatever"), StatusPolicy::Compat);
    }

    #[test]
    fn test_into_response_uses_policy() {
        let response = ErrorResponse::server_error()
            .with_policy(StatusPolicy::Mapped)
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ErrorResponse::server_error().into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
