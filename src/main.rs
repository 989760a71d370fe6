//! F1 MCP Server entry point.
//!
//! Loads configuration (including `.env`), initializes logging on stderr and
//! serves the F1 tools over the configured transport.

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use f1_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let (config, warnings) = Config::from_env_with_warnings();

    init_logging(&config.logging.level);
    for warning in &warnings {
        warn!("{}", warning);
    }

    config.validate().context("invalid configuration")?;

    info!("Starting {} v{}", config.server.name, config.server.version);

    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::new(config).context("failed to create MCP server")?;

    info!("Server initialized with {} tools", server.registry().tool_names().len());

    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// `RUST_LOG` wins over the configured level. Output goes to stderr because
/// stdout carries the STDIO transport.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
