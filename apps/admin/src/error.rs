//! # API Error Type
//!
//! Unified error type handed to the front end by the screen layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Darzi                                  │
//! │                                                                         │
//! │  Validation failed? ── ValidationError ──┐  (no network call made)     │
//! │                                          │                              │
//! │  Backend failed? ───── BackendError ─────┼──► ApiError ──► front end   │
//! │                                          │  (prior data stays on       │
//! │  Draft rule broken? ── CoreError ────────┘   screen, user retries)     │
//! │                                                                         │
//! │  Partial creation response?  NOT an error — degrades gracefully        │
//! │  Stats / UPI settings fetch? best-effort — logged, fallback applied    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is recoverable by user retry; none is fatal.

use serde::Serialize;

use darzi_backend::BackendError;
use darzi_core::{CoreError, ValidationError};

/// Error surfaced to the front end when a screen operation fails.
///
/// ## Serialization
/// ```json
/// { "code": "VALIDATION_ERROR", "message": "phone is required" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for screen operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed; no network call was made
    ValidationError,

    /// Backend unreachable (connection, timeout)
    NetworkError,

    /// Backend reached but the operation failed
    BackendError,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }
}

/// Converts gateway errors to API errors.
impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Transport(e) => {
                tracing::error!("Backend transport failure: {}", e);
                ApiError::new(ErrorCode::NetworkError, "Could not reach the backend")
            }
            BackendError::NotFound(message) => ApiError::new(ErrorCode::NotFound, message),
            BackendError::Rejected(message) => ApiError::new(ErrorCode::BackendError, message),
            BackendError::Server { status, message } => {
                tracing::error!(status, "Backend error: {}", message);
                ApiError::new(ErrorCode::BackendError, "Backend operation failed")
            }
        }
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            other => ApiError::validation(other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
