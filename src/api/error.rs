//! Upstream API error types.

use thiserror::Error;

/// Result type for upstream API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors raised while talking to the Ergast-compatible upstream.
///
/// Each variant is a distinct failure kind; tool handlers surface the
/// `Display` text verbatim so the kind stays visible to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection or transport level failure.
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    /// The bounded request timeout elapsed.
    #[error("upstream unreachable: request timed out after {0}s")]
    Timeout(u64),

    /// Upstream answered with a non-success status.
    #[error("upstream returned HTTP {status}{}", body_suffix(.body))]
    Status { status: u16, body: String },

    /// Body was not JSON or did not have the expected envelope.
    #[error("malformed upstream response: {0}")]
    Decode(String),

    /// The request could not be built.
    #[error("invalid upstream request: {0}")]
    InvalidRequest(String),
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(" ({body})")
    }
}

impl ApiError {
    /// Create an "unreachable" error.
    pub fn unreachable(msg: impl Into<String>) -> Self {
        Self::Unreachable(msg.into())
    }

    /// Create a status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Whether this failure means the upstream could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_) | Self::Timeout(_))
    }
}
