//! Current season calendar with past/upcoming markers.

use std::fmt::Write as _;

use async_trait::async_trait;

use super::next_race::current_schedule;
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::{format_race_datetime, parse_date};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{F1Tool, NoParams, Reply};

#[derive(Debug, Clone)]
pub struct RaceScheduleTool;

#[async_trait]
impl F1Tool for RaceScheduleTool {
    const NAME: &'static str = "get_race_schedule";
    const DESCRIPTION: &'static str = "Get F1 race schedule for current season";
    const FAILURE: &'static str = "Failed to get race schedule";
    type Params = NoParams;

    async fn run(_params: NoParams, ctx: &ToolContext) -> ToolResult<Reply> {
        let today = ctx.clock.today();
        let table = ctx.api().get(&current_schedule()).await?.into_race_table()?;
        let season = table.season.as_deref().unwrap_or("current");

        if table.races.is_empty() {
            return Err(ToolError::no_data(format!("no races found for the {season} season")));
        }

        let mut out = format!("**F1 {season} Race Calendar**\n\n");
        for race in &table.races {
            // ✅ already run, 🔜 today or later
            let marker = match parse_date(&race.date) {
                Some(date) if date < today => "✅",
                _ => "🔜",
            };
            let circuit = &race.circuit;
            let _ = write!(
                out,
                "{marker} **Round {}: {}**\n\
                 Location: {}, {}\n\
                 Circuit: {}\n\
                 Date: {}\n\n",
                race.round,
                race.race_name,
                circuit.location.locality,
                circuit.location.country,
                circuit.circuit_name,
                format_race_datetime(&race.date, race.time.as_deref())
            );
        }

        Ok(Reply::Text(out))
    }
}
