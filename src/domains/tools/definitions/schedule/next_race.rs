//! Next upcoming race of the current season.

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::info;

use crate::api::model::Race;
use crate::api::{ApiRequest, Season};
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::{format_race_datetime, parse_date};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{F1Tool, NoParams, Reply};

/// The race with the earliest date on or after `today`.
///
/// A race dated today counts as upcoming. Undated or unparsable entries are
/// skipped; ties keep the first entry in upstream order.
pub fn select_next_race(races: &[Race], today: NaiveDate) -> Option<&Race> {
    races
        .iter()
        .filter_map(|race| parse_date(&race.date).map(|date| (date, race)))
        .filter(|(date, _)| *date >= today)
        .min_by_key(|(date, _)| *date)
        .map(|(_, race)| race)
}

/// Current-season schedule request shared with the calendar tool.
pub(crate) fn current_schedule() -> ApiRequest {
    ApiRequest::new("{season}").season(Season::Current).limit(100)
}

#[derive(Debug, Clone)]
pub struct NextRaceTool;

#[async_trait]
impl F1Tool for NextRaceTool {
    const NAME: &'static str = "get_next_race";
    const DESCRIPTION: &'static str = "Get next F1 race details";
    const FAILURE: &'static str = "Failed to get next race";
    type Params = NoParams;

    async fn run(_params: NoParams, ctx: &ToolContext) -> ToolResult<Reply> {
        let today = ctx.clock.today();
        let table = ctx.api().get(&current_schedule()).await?.into_race_table()?;

        if table.races.is_empty() {
            return Err(ToolError::no_data("no races in the current season schedule"));
        }
        let race = select_next_race(&table.races, today)
            .ok_or_else(|| ToolError::no_data(format!("no upcoming races on or after {today}")))?;
        info!("Next race: {} on {}", race.race_name, race.date);

        let circuit = &race.circuit;
        Ok(Reply::Text(format!(
            "🏁 **Next F1 Race**\n\n\
             **{}**\n\
             **Location**: {}, {}\n\
             **Circuit**: {}\n\
             **Date**: {}\n\
             **🏁 Round**: {}\n\n\
             Get ready for some wheel-to-wheel action! 🏎️💨",
            race.race_name,
            circuit.location.locality,
            circuit.location.country,
            circuit.circuit_name,
            format_race_datetime(&race.date, race.time.as_deref()),
            race.round
        )))
    }
}
