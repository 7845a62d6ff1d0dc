//! API Error Types
//!
//! Errors raised while talking to the mileage log service. Status failures
//! and transport failures are kept apart so callers can report them, but the
//! client treats both the same way: the request chain stops.

use thiserror::Error;

/// Errors that can occur when communicating with the mileage log service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection refused or host unreachable
    #[error("Mileage service unavailable: {0}")]
    Unavailable(String),

    /// Only possible when a request timeout is configured
    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a reqwest failure the way the rest of the client reports it
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Unavailable(err.to_string())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Request(err)
        }
    }
}

/// Result type for service calls
pub type ApiResult<T> = Result<T, ApiError>;
