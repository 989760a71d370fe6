//! Every championship season, grouped by decade.

use std::fmt::Write as _;

use async_trait::async_trait;

use super::{listing, total_line};
use crate::api::Listing;
use crate::api::model::SeasonEntry;
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{F1Tool, NoParams, Reply};

/// Consecutive runs of seasons sharing a decade, in input order.
fn group_by_decade(seasons: &[SeasonEntry]) -> Vec<(String, Vec<&str>)> {
    let mut groups: Vec<(String, Vec<&str>)> = Vec::new();
    for entry in seasons {
        let year = entry.season.as_str();
        let decade = match year.parse::<u32>() {
            Ok(y) => format!("{}s", y / 10 * 10),
            Err(_) => "Other".to_string(),
        };
        match groups.last_mut() {
            Some((current, years)) if *current == decade => years.push(year),
            _ => groups.push((decade, vec![year])),
        }
    }
    groups
}

#[derive(Debug, Clone)]
pub struct SeasonsTool;

#[async_trait]
impl F1Tool for SeasonsTool {
    const NAME: &'static str = "get_all_seasons";
    const DESCRIPTION: &'static str = "Get all F1 seasons history";
    const FAILURE: &'static str = "Failed to get seasons";
    type Params = NoParams;

    async fn run(_params: NoParams, ctx: &ToolContext) -> ToolResult<Reply> {
        let Listing {
            rows: seasons,
            total,
        } = listing(ctx.api(), "seasons", |d| {
            d.into_season_table().map(|t| t.seasons)
        })
        .await?;

        let (Some(first), Some(last)) = (seasons.first(), seasons.last()) else {
            return Err(ToolError::no_data("no seasons found"));
        };

        let mut out = String::from("**Available F1 Seasons**\n\n");
        for (decade, years) in group_by_decade(&seasons) {
            let _ = writeln!(out, "**{decade}:** {}", years.join(", "));
        }
        let _ = write!(
            out,
            "\n{} (from {} to {})",
            total_line("Seasons", seasons.len(), total),
            first.season,
            last.season
        );

        Ok(Reply::Text(out))
    }
}
