//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Every registry entry becomes one dynamic route, so the STDIO transport
//! and the HTTP transport always expose the same tools.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::ErrorData as McpError;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter};

use super::registry::ToolRegistry;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .entries()
        .iter()
        .fold(ToolRouter::new(), |router, entry| {
            let registry = registry.clone();
            let name = entry.name;
            router.with_route(ToolRoute::new_dyn(
                entry.tool.clone(),
                move |ctx: ToolCallContext<'_, S>| {
                    let args = ctx.arguments.clone().unwrap_or_default();
                    let registry = registry.clone();
                    async move { registry.call(name, args).await.map_err(McpError::from) }.boxed()
                },
            ))
        })
}
