//! Race result plus qualifying overview for one weekend.

use std::fmt::Write as _;

use async_trait::async_trait;

use crate::api::{ApiRequest, PAGE_SIZE};
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::{
    RaceParams, position_key, position_number, result_line, single_race,
};
use crate::domains::tools::definitions::history::qualifying::best_session;
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{F1Tool, Reply};

const TOP: usize = 10;

#[derive(Debug, Clone)]
pub struct RaceAnalysisTool;

#[async_trait]
impl F1Tool for RaceAnalysisTool {
    const NAME: &'static str = "get_race_analysis";
    const DESCRIPTION: &'static str = "Get F1 race analysis and results";
    const FAILURE: &'static str = "Failed to get race analysis";
    type Params = RaceParams;

    async fn run(params: RaceParams, ctx: &ToolContext) -> ToolResult<Reply> {
        let results = ApiRequest::new("{season}/{round}/results")
            .season(params.season())
            .round(params.round())
            .limit(PAGE_SIZE);
        let qualifying = ApiRequest::new("{season}/{round}/qualifying")
            .season(params.season())
            .round(params.round())
            .limit(PAGE_SIZE);

        let (results, qualifying) =
            futures::try_join!(ctx.api().get(&results), ctx.api().get(&qualifying))?;

        let race = single_race(results.into_race_table()?.races, || {
            format!("no race for {}", params.label())
        })?;
        if race.results.is_empty() {
            return Err(ToolError::no_data(format!("no results for {}", params.label())));
        }
        let mut grid = qualifying
            .into_race_table()?
            .races
            .into_iter()
            .next()
            .map(|race| race.qualifying_results)
            .unwrap_or_default();
        grid.sort_by_key(|r| position_key(Some(r.position.as_str())));

        let location = &race.circuit.location;
        let mut out = format!(
            "🏁 **{} - {} Race Analysis**\n\n\
             **Circuit:** {}\n\
             **Location:** {}, {}\n\
             **Date:** {}\n\
             🏁 **Round:** {}\n\n",
            race.race_name,
            race.season,
            race.circuit.circuit_name,
            location.locality,
            location.country,
            race.date,
            race.round
        );

        if !grid.is_empty() {
            out.push_str("**⏱️ QUALIFYING RESULTS:**\n");
            for result in grid.iter().take(TOP) {
                let time = best_session(result).map_or("N/A", |(_, time)| time);
                let _ = writeln!(
                    out,
                    "P{}: {} ({}) - {time}",
                    result.position,
                    result.driver.full_name(),
                    result.constructor.name
                );
            }
            out.push('\n');
        }

        out.push_str("**🏆 RACE RESULTS:**\n");
        for result in race.results.iter().take(TOP) {
            let _ = writeln!(out, "{}", result_line(result));
        }
        out.push('\n');

        let winner = race
            .results
            .iter()
            .find(|r| position_number(&r.position) == Some(1))
            .or_else(|| race.results.first());
        if let Some(winner) = winner {
            let _ = writeln!(
                out,
                "**🏆 Race Winner:** {} ({})",
                winner.driver.full_name(),
                winner.constructor.name
            );
        }

        let fastest = race.results.iter().find_map(|r| {
            r.fastest_lap
                .as_ref()
                .filter(|lap| lap.rank.as_deref() == Some("1"))
                .map(|lap| (r, lap))
        });
        if let Some((result, lap)) = fastest {
            let _ = writeln!(
                out,
                "**⚡ Fastest Lap:** {} - {} (Lap {})",
                result.driver.full_name(),
                lap.time.as_ref().map_or("N/A", |t| t.time.as_str()),
                lap.lap.as_deref().unwrap_or("N/A")
            );
        }

        Ok(Reply::Text(out))
    }
}
