//! Constructors entered in the current season.

use std::fmt::Write as _;

use async_trait::async_trait;

use super::{listing, total_line};
use crate::api::Listing;
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{F1Tool, NoParams, Reply};

#[derive(Debug, Clone)]
pub struct ConstructorsTool;

#[async_trait]
impl F1Tool for ConstructorsTool {
    const NAME: &'static str = "get_current_constructors";
    const DESCRIPTION: &'static str = "Get current F1 teams";
    const FAILURE: &'static str = "Failed to get current constructors";
    type Params = NoParams;

    async fn run(_params: NoParams, ctx: &ToolContext) -> ToolResult<Reply> {
        let mut season = None;
        let Listing {
            rows: constructors,
            total,
        } = listing(ctx.api(), "current/constructors", |d| {
            let table = d.into_constructor_table()?;
            season = season.take().or(table.season);
            Ok(table.constructors)
        })
        .await?;
        let season = season.as_deref().unwrap_or("Current");
        if constructors.is_empty() {
            return Err(ToolError::no_data(format!(
                "no constructors found for the {season} season"
            )));
        }

        let mut out = format!(
            "**{season} F1 Constructor Lineup**\n\n{}\n\n",
            total_line("Teams", constructors.len(), total)
        );
        for constructor in &constructors {
            let _ = writeln!(
                out,
                "**{}** ({})",
                constructor.name,
                constructor.nationality.as_deref().unwrap_or("Unknown")
            );
            if let Some(url) = &constructor.url {
                let _ = writeln!(out, "  Link: {url}");
            }
        }

        Ok(Reply::Text(out))
    }
}
