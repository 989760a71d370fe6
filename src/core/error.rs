//! Error types and handling for the MCP server.
//!
//! Each layer has its own `thiserror` enum; this one unifies them for the
//! startup path (configuration, client construction, transport).

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// The upstream F1 API client could not be built or called.
    #[error("F1 API error: {0}")]
    Api(#[from] crate::api::ApiError),

    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// The transport failed to start or stopped abnormally.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from network communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors that should not occur under normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    #[test]
    fn test_layer_errors_convert() {
        let err: Error = ApiError::unreachable("connection refused").into();
        assert!(matches!(err, Error::Api(_)));
        assert!(err.to_string().starts_with("F1 API error"));

        let err: Error = crate::domains::tools::ToolError::not_found("nope").into();
        assert!(matches!(err, Error::Tool(_)));
    }

    #[test]
    fn test_config_error_message() {
        let err = Error::config("F1 API timeout must be at least 1 second");
        assert_eq!(
            err.to_string(),
            "Configuration error: F1 API timeout must be at least 1 second"
        );
    }
}
