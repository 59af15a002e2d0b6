//! # Gateway Error Types
//!
//! HTTP failures mapped to a typed error the screen layer can translate into
//! user-visible messages. A gateway error always means the operation was
//! not applied; previously displayed data stays valid.

use thiserror::Error;

/// Errors from the REST gateway.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport-level failure: connection refused, timeout, TLS, or a body
    /// that failed to decode.
    #[error("Backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// 404 from the backend.
    #[error("Not found: {0}")]
    NotFound(String),

    /// 400/422 from the backend.
    #[error("Rejected by backend: {0}")]
    Rejected(String),

    /// Any other non-success status.
    #[error("Backend error (HTTP {status}): {message}")]
    Server { status: u16, message: String },
}

/// Convenience type alias for Results with BackendError.
pub type BackendResult<T> = Result<T, BackendError>;
