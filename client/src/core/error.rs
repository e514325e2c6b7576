//! # Common Error Types
//!
//! Error handling for the API client, repositories and session layer.
//!
//! [`ApiError`] keeps the distinctions callers actually branch on:
//!
//! - **Network**: the request never produced a response (connection refused, timeout, TLS)
//! - **Decode**: a response arrived but its body did not match the expected shape
//! - **Status**: the server answered with a non-2xx status
//! - **WebSocket**: the signal stream failed to open or broke mid-stream
//! - **InvalidUrl**: a configured base URL cannot be parsed
//! - **Validation**: input rejected before any request was sent
//!
//! Repositories propagate these unchanged. View-models turn them into strings
//! with a context prefix (`"Failed to load portfolio: Network error: ..."`).
//!
//! ## Usage Pattern
//!
//! ```rust,no_run
//! use fks_client::core::error::ApiError;
//!
//! fn validate_allocation(target: f64) -> Result<f64, ApiError> {
//!     if !(0.0..=1.0).contains(&target) {
//!         return Err(ApiError::Validation("Allocation must be between 0 and 1".to_string()));
//!     }
//!     Ok(target)
//! }
//! ```

use thiserror::Error;

/// Error type for every call that goes through [`crate::services::api::ApiClient`].
///
/// Each variant carries a descriptive message; `Status` also keeps the HTTP code.
/// The type is `Clone` so results can be cached in state snapshots and test fakes.
///
/// # Example
///
/// ```rust
/// use fks_client::core::error::ApiError;
///
/// let err = ApiError::Status { status: 401, message: "Invalid credentials".to_string() };
/// assert_eq!(err.to_string(), "HTTP 401: Invalid credentials");
/// assert!(err.is_unauthorized());
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Transport-level failure before a response was received.
    #[error("Network error: {0}")]
    Network(String),

    /// Response body did not decode into the requested type.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Non-2xx response. `message` is the server's `detail` when it sent one.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// WebSocket handshake or stream failure.
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Input rejected locally, no request was made.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ApiError {
    /// HTTP status code, for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server rejected the bearer token (or the credentials).
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for ApiError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        ApiError::WebSocket(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ApiError::Network("connection refused".to_string()).to_string(),
            "Network error: connection refused"
        );
        assert_eq!(
            ApiError::Decode("missing field `price`".to_string()).to_string(),
            "Failed to parse response: missing field `price`"
        );
    }

    #[test]
    fn test_status_helpers() {
        let err = ApiError::Status { status: 503, message: "down".to_string() };
        assert_eq!(err.status(), Some(503));
        assert!(!err.is_unauthorized());
        assert_eq!(ApiError::WebSocket("closed".to_string()).status(), None);
    }

    #[test]
    fn test_serde_error_is_decode() {
        let err: ApiError = serde_json::from_str::<u32>("\"nope\"").unwrap_err().into();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
