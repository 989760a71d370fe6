//! Tool handler plumbing shared by every tool definition.
//!
//! A tool is a zero-sized type implementing [`F1Tool`]: a name, a
//! description, a params struct and an async `run`. The generic helpers here
//! turn that into an rmcp `Tool` model and a type-erased [`Handler`] that the
//! registry stores, so individual definitions never touch JSON-RPC details.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::context::ToolContext;
use super::error::{ToolError, ToolResult};

/// Successful tool output.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Plain formatted text.
    Text(String),
    /// Text plus a machine-readable record.
    Structured {
        text: String,
        data: serde_json::Value,
    },
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Structured { text, .. } => text,
        }
    }

    fn into_result(self) -> CallToolResult {
        match self {
            Self::Text(text) => CallToolResult::success(vec![Content::text(text)]),
            Self::Structured { text, data } => CallToolResult {
                content: vec![Content::text(text)],
                structured_content: Some(data),
                is_error: Some(false),
                meta: None,
            },
        }
    }
}

impl From<String> for Reply {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Params type for tools without arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

/// A single MCP tool.
#[async_trait]
pub trait F1Tool: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Prefix of the error text reported when `run` fails.
    const FAILURE: &'static str;

    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    async fn run(params: Self::Params, ctx: &ToolContext) -> ToolResult<Reply>;
}

/// Type-erased entry point stored in the registry.
pub type Handler =
    fn(JsonObject, Arc<ToolContext>) -> BoxFuture<'static, ToolResult<CallToolResult>>;

/// Create a Tool model for `T` (metadata).
pub fn to_tool<T: F1Tool>() -> Tool {
    Tool {
        name: T::NAME.into(),
        description: Some(T::DESCRIPTION.into()),
        input_schema: cached_schema_for_type::<T::Params>(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Decode raw call arguments into a params struct.
pub fn parse_params<P: DeserializeOwned>(arguments: JsonObject) -> ToolResult<P> {
    serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Run `T` and fold any failure into an MCP error result.
pub async fn execute<T: F1Tool>(params: T::Params, ctx: &ToolContext) -> CallToolResult {
    let started = Instant::now();
    let outcome = T::run(params, ctx).await;
    debug!(tool = T::NAME, elapsed = ?started.elapsed(), ok = outcome.is_ok(), "Tool finished");

    match outcome {
        Ok(reply) => reply.into_result(),
        Err(err) => error_result(&format!("{}: {}", T::FAILURE, err)),
    }
}

/// [`Handler`] for `T`: decode arguments, then [`execute`].
///
/// Argument decoding failures are returned as `Err` so transports can
/// report them as invalid params; everything else becomes a tool result.
pub fn dispatch<T: F1Tool>(
    arguments: JsonObject,
    ctx: Arc<ToolContext>,
) -> BoxFuture<'static, ToolResult<CallToolResult>> {
    async move {
        let params = parse_params::<T::Params>(arguments)?;
        Ok(execute::<T>(params, &ctx).await)
    }
    .boxed()
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::api::testing::FakeApi;
    use crate::core::config::Config;
    use crate::domains::tools::context::Clock;
    use chrono::NaiveDate;

    /// Context over a fake upstream with the clock pinned to 2024-06-15.
    pub fn context(api: FakeApi) -> (ToolContext, Arc<FakeApi>) {
        context_with_config(api, Config::default())
    }

    pub fn context_with_config(api: FakeApi, config: Config) -> (ToolContext, Arc<FakeApi>) {
        let api = Arc::new(api);
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap_or_default();
        let ctx = ToolContext::new(Arc::new(config), api.clone()).with_clock(Clock::Fixed(today));
        (ctx, api)
    }

    /// First text block of a result.
    pub fn result_text(result: &CallToolResult) -> String {
        result
            .content
            .first()
            .and_then(|c| c.raw.as_text())
            .map(|t| t.text.clone())
            .unwrap_or_default()
    }

    pub fn is_error(result: &CallToolResult) -> bool {
        result.is_error.unwrap_or(false)
    }
}
