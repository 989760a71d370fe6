//! Static server metadata.

use async_trait::async_trait;
use serde::Serialize;

use crate::domains::tools::context::ToolContext;
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{F1Tool, NoParams, Reply};
use crate::domains::tools::registry::TOOL_COUNT;

const DISPLAY_NAME: &str = "Formula 1 MCP Server";

#[derive(Debug, Clone, Serialize)]
pub struct AboutInfo {
    pub name: String,
    pub server: String,
    pub version: String,
    pub description: String,
    pub tool_count: usize,
    pub data_source: String,
}

#[derive(Debug, Clone)]
pub struct AboutTool;

impl AboutTool {
    fn description() -> String {
        format!(
            "🏎️ Formula 1 in your pocket 🏁\n\n\
             Race information, championship standings, historical seasons, driver profiles, \
             race analysis and F1 trivia, served from an Ergast-compatible statistics API.\n\n\
             {TOOL_COUNT} F1 tools covering upcoming races, results, qualifying, sprints, \
             pit stops, lap times and driver comparisons from 1950 to present."
        )
    }
}

#[async_trait]
impl F1Tool for AboutTool {
    const NAME: &'static str = "about";
    const DESCRIPTION: &'static str = "Get F1 server information";
    const FAILURE: &'static str = "Failed to get server information";
    type Params = NoParams;

    async fn run(_params: NoParams, ctx: &ToolContext) -> ToolResult<Reply> {
        let info = AboutInfo {
            name: DISPLAY_NAME.to_string(),
            server: ctx.config.server.name.clone(),
            version: ctx.config.server.version.clone(),
            description: Self::description(),
            tool_count: TOOL_COUNT,
            data_source: ctx.config.upstream.base_url.clone(),
        };

        let text = format!(
            "**{}** v{}\n\n{}",
            info.name, info.version, info.description
        );
        let data = serde_json::to_value(&info).map_err(|e| ToolError::internal(e.to_string()))?;

        Ok(Reply::Structured { text, data })
    }
}
