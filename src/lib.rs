//! F1 MCP Server Library
//!
//! An MCP server that answers Formula 1 questions from an Ergast-compatible
//! statistics API (Jolpica by default).
//!
//! # Architecture
//!
//! - **api**: typed client for the upstream API behind the `ErgastApi` trait
//! - **core**: configuration, error handling, the rmcp server handler, transports
//! - **domains::tools**: the 22 tools, their registry and the rmcp router
//!
//! # Example
//!
//! ```rust,no_run
//! use f1_mcp_server::{Config, McpServer, core::TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     config.validate()?;
//!     let transport = TransportService::new(config.transport.clone());
//!     let server = McpServer::new(config)?;
//!     transport.run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
