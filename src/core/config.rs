//! Configuration management for the F1 MCP server.
//!
//! Configuration is built once at startup from environment variables (a
//! `.env` file is honoured) and shared read-only behind an `Arc`.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default Ergast-compatible endpoint.
pub const DEFAULT_F1_API_URL: &str = "https://api.jolpi.ca/ergast/f1";

/// Default per-request upstream timeout.
pub const DEFAULT_F1_API_TIMEOUT_SECS: u64 = 10;

/// Main configuration structure for the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Upstream statistics API.
    pub upstream: UpstreamConfig,

    /// Caller authentication and identity.
    pub auth: AuthConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Where and how to reach the Ergast-compatible API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL without the trailing resource path.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Bearer token for the HTTP transport and the owner number reported by `validate`.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    pub token: Option<String>,
    pub owner_number: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("owner_number", &self.owner_number)
            .finish()
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_F1_API_URL.to_string(),
            timeout_secs: DEFAULT_F1_API_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "f1-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            upstream: UpstreamConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Variables are prefixed with `MCP_`, for example `MCP_F1_API_URL`.
    /// Diagnostics are logged immediately, so call this after the tracing
    /// subscriber is installed or use [`Config::from_env_with_warnings`].
    pub fn from_env() -> Self {
        let (config, warnings) = Self::from_env_with_warnings();
        for warning in &warnings {
            warn!("{}", warning);
        }
        config
    }

    /// Load configuration and return the diagnostics instead of logging them.
    ///
    /// Unparsable numeric values fall back to their defaults; missing
    /// credentials are reported but not fatal.
    pub fn from_env_with_warnings() -> (Self, Vec<String>) {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        let mut warnings = Vec::new();

        if let Some(name) = non_empty_var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = non_empty_var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::read_env(&mut warnings);

        if let Some(url) = non_empty_var("MCP_F1_API_URL") {
            config.upstream.base_url = url;
        }

        if let Some(raw) = non_empty_var("MCP_F1_API_TIMEOUT_SECS") {
            match raw.parse() {
                Ok(secs) => config.upstream.timeout_secs = secs,
                Err(_) => warnings.push(format!(
                    "Ignoring MCP_F1_API_TIMEOUT_SECS={raw:?}, using {DEFAULT_F1_API_TIMEOUT_SECS}s"
                )),
            }
        }

        config.auth.token = non_empty_var("MCP_AUTH_TOKEN");
        if config.auth.token.is_none() {
            warnings.push(
                "MCP_AUTH_TOKEN not set - HTTP transport will accept unauthenticated calls"
                    .to_string(),
            );
        }

        config.auth.owner_number = non_empty_var("MCP_OWNER_NUMBER");
        if config.auth.owner_number.is_none() {
            warnings.push(
                "MCP_OWNER_NUMBER not set - the validate tool will report an error".to_string(),
            );
        }

        (config, warnings)
    }

    /// Reject settings the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        let url = self.upstream.base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::config(format!(
                "F1 API URL must start with http:// or https://, got {url:?}"
            )));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(Error::config("F1 API timeout must be at least 1 second"));
        }
        if self.server.name.trim().is_empty() {
            return Err(Error::config("server name must not be empty"));
        }
        Ok(())
    }
}

/// Serializes tests that touch process environment variables.
#[cfg(test)]
pub(crate) static ENV_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
