//! Results of the most recent race.

use std::fmt::Write as _;

use async_trait::async_trait;

use crate::api::model::Race;
use crate::api::{ApiRequest, Round, Season};
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::{
    format_points, format_race_datetime, parse_points, time_or_status,
};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{F1Tool, NoParams, Reply};

/// Among `races`, the highest round that already has results.
pub fn select_latest_race(races: &[Race]) -> Option<&Race> {
    races
        .iter()
        .filter(|race| !race.results.is_empty())
        .max_by_key(|race| race.round_number())
}

#[derive(Debug, Clone)]
pub struct LatestResultsTool;

#[async_trait]
impl F1Tool for LatestResultsTool {
    const NAME: &'static str = "get_latest_race_results";
    const DESCRIPTION: &'static str = "Get latest F1 race results";
    const FAILURE: &'static str = "Failed to get race results";
    type Params = NoParams;

    async fn run(_params: NoParams, ctx: &ToolContext) -> ToolResult<Reply> {
        let request = ApiRequest::new("{season}/{round}/results")
            .season(Season::Current)
            .round(Round::Last)
            .limit(100);
        let table = ctx.api().get(&request).await?.into_race_table()?;

        let race = select_latest_race(&table.races)
            .ok_or_else(|| ToolError::no_data("race results not available yet"))?;
        let circuit = &race.circuit;

        let mut out = format!(
            "🏁 **Latest Race Results**\n\
             **{}** (Round {})\n\
             Location: {}, {}\n\
             Circuit: {}\n\
             Date: {}\n\n\
             **Final Positions:**\n",
            race.race_name,
            race.round,
            circuit.location.locality,
            circuit.location.country,
            circuit.circuit_name,
            format_race_datetime(&race.date, race.time.as_deref())
        );

        for result in &race.results {
            let label = if result.time.is_some() { "Time" } else { "Status" };
            let _ = write!(
                out,
                "**P{}: {}** ({})\n   {label}: {}\n   Points: {}\n\n",
                result.position,
                result.driver.full_name(),
                result.constructor.name,
                time_or_status(result),
                format_points(parse_points(&result.points))
            );
        }

        Ok(Reply::Text(out))
    }
}
