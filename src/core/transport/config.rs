//! Transport selection (`MCP_TRANSPORT`) and HTTP listener settings.

use serde::{Deserialize, Serialize};
use tracing::warn;

#[cfg(feature = "http")]
pub const DEFAULT_HTTP_PORT: u16 = 8087;

#[cfg(feature = "http")]
pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";

#[cfg(feature = "http")]
pub const DEFAULT_RPC_PATH: &str = "/mcp";

/// Which transport the server runs on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// rmcp over stdin/stdout.
    #[cfg(feature = "stdio")]
    Stdio,

    /// JSON-RPC over HTTP POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// HTTP listener settings.
#[cfg(feature = "http")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub port: u16,
    pub host: String,

    /// Route of the JSON-RPC endpoint, always starting with `/`.
    pub rpc_path: String,

    /// Allow any origin, for browser-based MCP clients.
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_HTTP_PORT,
            host: DEFAULT_HTTP_HOST.to_string(),
            rpc_path: DEFAULT_RPC_PATH.to_string(),
            enable_cors: true,
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    /// Read `MCP_HTTP_*`; bad values keep their defaults with a warning.
    pub fn from_env() -> Self {
        let mut warnings = Vec::new();
        let cfg = Self::read_env(&mut warnings);
        for warning in &warnings {
            warn!("{}", warning);
        }
        cfg
    }

    fn read_env(warnings: &mut Vec<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(raw) = var("MCP_HTTP_PORT") {
            match raw.parse() {
                Ok(port) => cfg.port = port,
                Err(_) => warnings.push(format!(
                    "Ignoring MCP_HTTP_PORT={raw:?}, using {}",
                    cfg.port
                )),
            }
        }
        if let Some(host) = var("MCP_HTTP_HOST") {
            cfg.host = host;
        }
        if let Some(path) = var("MCP_HTTP_PATH") {
            cfg.rpc_path = normalize_path(&path);
        }
        if let Some(raw) = var("MCP_HTTP_CORS") {
            cfg.enable_cors = !matches!(raw.to_lowercase().as_str(), "false" | "0" | "no" | "off");
        }

        cfg
    }
}

#[cfg(feature = "http")]
fn var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(feature = "http")]
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        DEFAULT_RPC_PATH.to_string()
    } else {
        format!("/{trimmed}")
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            Self::Stdio
        }

        #[cfg(all(not(feature = "stdio"), feature = "http"))]
        {
            Self::Http(HttpConfig::default())
        }

        #[cfg(not(any(feature = "stdio", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio or http");
        }
    }
}

impl TransportConfig {
    /// HTTP transport on the given address with default path and CORS.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// `MCP_TRANSPORT=http` selects HTTP; anything else falls back to the default.
    pub fn from_env() -> Self {
        let mut warnings = Vec::new();
        let config = Self::read_env(&mut warnings);
        for warning in &warnings {
            warn!("{}", warning);
        }
        config
    }

    /// Like [`TransportConfig::from_env`], collecting diagnostics into `warnings`.
    pub fn read_env(#[allow(unused_variables)] warnings: &mut Vec<String>) -> Self {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig::read_env(warnings)),
            _ => Self::default(),
        }
    }

    /// Short description for the startup log.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }
}
