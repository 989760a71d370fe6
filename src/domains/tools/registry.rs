//! Tool Registry - central registration and dispatch for all tools.
//!
//! The registry is the single source of truth: the catalogue order below is
//! the order tools are listed in, the HTTP transport dispatches through
//! [`ToolRegistry::call`], and the rmcp router is derived from its entries.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::{info, warn};

use super::context::ToolContext;
use super::definitions::*;
use super::error::{ToolError, ToolResult};
use super::handlers::{F1Tool, Handler, dispatch, to_tool};

/// Number of tools the server exposes.
pub const TOOL_COUNT: usize = 22;

/// A registered tool: metadata plus its type-erased handler.
#[derive(Clone)]
pub struct ToolEntry {
    pub name: &'static str,
    pub tool: Tool,
    handler: Handler,
}

impl ToolEntry {
    fn of<T: F1Tool>() -> Self {
        Self {
            name: T::NAME,
            tool: to_tool::<T>(),
            handler: dispatch::<T>,
        }
    }
}

fn catalogue() -> Vec<ToolEntry> {
    vec![
        ToolEntry::of::<ValidateTool>(),
        ToolEntry::of::<AboutTool>(),
        ToolEntry::of::<NextRaceTool>(),
        ToolEntry::of::<RaceScheduleTool>(),
        ToolEntry::of::<LatestResultsTool>(),
        ToolEntry::of::<DriverStandingsTool>(),
        ToolEntry::of::<ConstructorStandingsTool>(),
        ToolEntry::of::<SeasonsTool>(),
        ToolEntry::of::<CircuitsTool>(),
        ToolEntry::of::<DriversTool>(),
        ToolEntry::of::<ConstructorsTool>(),
        ToolEntry::of::<StatusCodesTool>(),
        ToolEntry::of::<HistoricalScheduleTool>(),
        ToolEntry::of::<QualifyingTool>(),
        ToolEntry::of::<SprintTool>(),
        ToolEntry::of::<PitStopsTool>(),
        ToolEntry::of::<LapTimesTool>(),
        ToolEntry::of::<RaceAnalysisTool>(),
        ToolEntry::of::<DriverProfileTool>(),
        ToolEntry::of::<SeasonPerformanceTool>(),
        ToolEntry::of::<CompareDriversTool>(),
        ToolEntry::of::<TriviaTool>(),
    ]
}

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    ctx: Arc<ToolContext>,
    entries: Vec<ToolEntry>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Create a registry whose handlers run against `ctx`.
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        let entries = catalogue();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.name, i))
            .collect();
        Self {
            ctx,
            entries,
            index,
        }
    }

    /// Get all tool names, in catalogue order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn tools(&self) -> Vec<Tool> {
        self.entries.iter().map(|e| e.tool.clone()).collect()
    }

    pub fn entries(&self) -> &[ToolEntry] {
        &self.entries
    }

    /// Dispatch a tool call by name.
    ///
    /// Unknown names and undecodable arguments are `Err`; every failure
    /// inside the tool itself comes back as an error `CallToolResult`.
    pub async fn call(&self, name: &str, arguments: JsonObject) -> ToolResult<CallToolResult> {
        let Some(entry) = self.index.get(name).map(|&i| &self.entries[i]) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };
        info!(tool = entry.name, "Calling tool");
        (entry.handler)(arguments, self.ctx.clone()).await
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tool_names())
            .finish()
    }
}
