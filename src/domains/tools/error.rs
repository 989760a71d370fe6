//! Tool-specific error types.

use rmcp::ErrorData as McpError;
use thiserror::Error;

use crate::api::ApiError;

/// Result type for tool handlers.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("invalid argument: {0}")]
    InvalidArguments(String),

    /// Upstream answered, but had nothing for the query.
    #[error("No data found: {0}")]
    NoData(String),

    /// The upstream call failed.
    #[error(transparent)]
    Upstream(#[from] ApiError),

    /// The tool cannot run with the current server configuration.
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "no data" error.
    pub fn no_data(msg: impl Into<String>) -> Self {
        Self::NoData(msg.into())
    }

    /// Create a new "not configured" error.
    pub fn not_configured(msg: impl Into<String>) -> Self {
        Self::NotConfigured(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Invalid value for a named parameter.
    pub fn invalid_param(param: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidArguments(format!("{param}: {reason}"))
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::NotFound(_) | ToolError::InvalidArguments(_) => {
                McpError::invalid_params(err.to_string(), None)
            }
            other => McpError::internal_error(other.to_string(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_is_transparent() {
        let err: ToolError = ApiError::unreachable("connection refused").into();
        assert_eq!(err.to_string(), "upstream unreachable: connection refused");
    }

    #[test]
    fn test_invalid_param_names_parameter() {
        let err = ToolError::invalid_param("driver_id", "must not be empty");
        assert_eq!(err.to_string(), "invalid argument: driver_id: must not be empty");
    }

    #[test]
    fn test_protocol_error_codes() {
        let err = McpError::from(ToolError::invalid_arguments("missing field `driver_id`"));
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);

        let err = McpError::from(ToolError::internal("boom"));
        assert_eq!(err.code, rmcp::model::ErrorCode::INTERNAL_ERROR);
    }
}
