//! Channel validation tool.

use async_trait::async_trait;
use tracing::info;

use crate::domains::tools::context::ToolContext;
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{F1Tool, NoParams, Reply};

/// Confirms the caller reached this server and reports the owner number.
#[derive(Debug, Clone)]
pub struct ValidateTool;

#[async_trait]
impl F1Tool for ValidateTool {
    const NAME: &'static str = "validate";
    const DESCRIPTION: &'static str = "Validate server connection";
    const FAILURE: &'static str = "Failed to validate";
    type Params = NoParams;

    async fn run(_params: NoParams, ctx: &ToolContext) -> ToolResult<Reply> {
        let number = ctx
            .config
            .auth
            .owner_number
            .clone()
            .ok_or_else(|| ToolError::not_configured("MCP_OWNER_NUMBER must be set"))?;
        info!("Validation successful");
        Ok(Reply::Text(number))
    }
}
