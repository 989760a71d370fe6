//! MCP Server implementation and lifecycle management.
//!
//! [`McpServer`] owns the tool registry and the rmcp router derived from it.
//! The STDIO transport drives it through rmcp's `ServerHandler`; the HTTP
//! transport calls [`McpServer::list_tools`] and [`McpServer::call_tool`]
//! directly, so both see the same catalogue and the same handlers.

use rmcp::{
    ServerHandler,
    handler::server::tool::ToolRouter,
    model::{CallToolResult, Implementation, JsonObject, ServerCapabilities, ServerInfo},
    tool_handler,
};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::error::Error;
use crate::api::{ErgastApi, ErgastClient};
use crate::domains::tools::{ToolContext, ToolRegistry, ToolResult, build_tool_router};

/// Text returned to clients in `initialize`.
pub const INSTRUCTIONS: &str = "Formula 1 statistics server backed by the Ergast-compatible \
Jolpica API. Use get_next_race, get_race_schedule and get_latest_race_results for the current \
season, the get_all_* and get_current_* tools for reference lists, the per-race tools with a \
year and round_num for history, and get_driver_profile or compare_drivers for driver analysis. \
Driver ids are Ergast ids such as 'hamilton' or 'max_verstappen'.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    config: Arc<Config>,

    /// Name-to-handler map shared with the HTTP transport.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls over rmcp.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a server that talks to the upstream configured in `config`.
    pub fn new(config: Config) -> std::result::Result<Self, Error> {
        let client = ErgastClient::new(&config.upstream)?;
        info!("Using F1 API at {}", client.base_url());
        Ok(Self::with_api(config, Arc::new(client)))
    }

    /// Create a server backed by any [`ErgastApi`] implementation.
    pub fn with_api(config: Config, api: Arc<dyn ErgastApi>) -> Self {
        let config = Arc::new(config);
        let ctx = Arc::new(ToolContext::new(config.clone(), api));
        let registry = Arc::new(ToolRegistry::new(ctx));

        Self {
            tool_router: build_tool_router::<Self>(registry.clone()),
            registry,
            config,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// List all available tools as MCP `tools/list` entries.
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.registry
            .tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> ToolResult<CallToolResult> {
        self.registry.call(name, arguments).await
    }
}

impl std::fmt::Debug for McpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpServer")
            .field("name", &self.name())
            .field("registry", &self.registry)
            .finish()
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeApi;
    use crate::domains::tools::TOOL_COUNT;

    fn server() -> McpServer {
        McpServer::with_api(Config::default(), Arc::new(FakeApi::offline()))
    }

    #[test]
    fn test_info_enables_tools_only() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
        assert_eq!(info.server_info.name, "f1-mcp-server");
        assert!(info.instructions.unwrap().contains("Formula 1"));
    }

    #[test]
    fn test_list_tools_matches_registry() {
        let server = server();
        let tools = server.list_tools();
        assert_eq!(tools.len(), TOOL_COUNT);
        assert_eq!(tools[0]["name"], "validate");
        assert!(tools.iter().all(|t| t["inputSchema"].is_object()));
    }

    #[test]
    fn test_new_builds_client_for_default_config() {
        assert!(McpServer::new(Config::default()).is_ok());
    }

    #[tokio::test]
    async fn test_rmcp_router_serves_same_catalogue() {
        let server = server();
        let routed = server.tool_router.list_all();
        assert_eq!(routed.len(), TOOL_COUNT);
        assert!(server.tool_router.has_route("get_status_codes"));
    }

    #[tokio::test]
    async fn test_call_tool_goes_through_registry() {
        let result = server()
            .call_tool("f1_trivia", JsonObject::new())
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));
    }
}
