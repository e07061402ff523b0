//! API error handling for the PROJTRACK web layer.
//!
//! Internal errors are mapped to tagged error codes here; raw error
//! text from the data store never reaches the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::AuthError;
use crate::ProjtrackError;

/// Generic message shown for any data-store failure.
pub const TECHNICAL_ISSUES: &str = "Sorry, we're having technical issues. Please try again later.";

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Unauthorized (401).
    Unauthorized,
    /// CSRF token missing or wrong (403). Fatal to the request.
    CsrfMismatch,
    /// Not found (404) - also covers ownership mismatches.
    NotFound,
    /// Validation error (422) - ordered rule violations.
    ValidationError,
    /// Account locked (423).
    Locked,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::CsrfMismatch => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::Locked => StatusCode::LOCKED,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Ordered rule-violation messages (validation errors only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// Sanitized echo of the submitted input, for form re-display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<serde_json::Value>,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    errors: Option<Vec<String>>,
    input: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            errors: None,
            input: None,
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Create the CSRF mismatch error. Always the same text.
    pub fn csrf_mismatch() -> Self {
        Self::new(ErrorCode::CsrfMismatch, "Invalid CSRF token.")
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create an account-locked error.
    pub fn locked(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Locked, message)
    }

    /// Create a validation error carrying the full ordered list of
    /// violated-rule messages.
    pub fn validation(errors: Vec<String>) -> Self {
        Self {
            code: ErrorCode::ValidationError,
            message: "Validation failed".to_string(),
            errors: Some(errors),
            input: None,
        }
    }

    /// Attach a sanitized echo of the submitted input.
    pub fn with_input(mut self, input: serde_json::Value) -> Self {
        self.input = Some(input);
        self
    }

    /// Create an internal server error with a user-safe message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Log a data-store failure and return the generic message.
    pub fn storage(detail: impl std::fmt::Display) -> Self {
        tracing::error!("Storage error: {detail}");
        Self::internal(TECHNICAL_ISSUES)
    }

    /// The error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
                errors: self.errors,
                input: self.input,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match &err {
            AuthError::BadCredentials => ApiError::unauthorized(err.to_string()),
            AuthError::Locked => ApiError::locked(err.to_string()),
            AuthError::Storage(detail) => ApiError::storage(detail),
        }
    }
}

impl From<ProjtrackError> for ApiError {
    fn from(err: ProjtrackError) -> Self {
        match err {
            ProjtrackError::NotFound(what) => ApiError::not_found(format!("{what} not found")),
            ProjtrackError::Validation(msg) => ApiError::validation(vec![msg]),
            ProjtrackError::Auth(msg) => ApiError::unauthorized(msg),
            other => ApiError::storage(other),
        }
    }
}
