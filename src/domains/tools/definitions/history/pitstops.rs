//! Pit stop summary per driver.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use async_trait::async_trait;

use crate::api::model::PitStop;
use crate::api::{ApiRequest, fetch_all_races};
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::{RaceParams, single_race, time_seconds};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{F1Tool, Reply};

fn duration_seconds(stop: &PitStop) -> Option<f64> {
    stop.duration.as_deref().and_then(time_seconds)
}

/// Quickest stop with a usable duration; the earliest wins ties.
pub fn fastest_stop(stops: &[PitStop]) -> Option<&PitStop> {
    stops
        .iter()
        .filter_map(|stop| duration_seconds(stop).map(|secs| (stop, secs)))
        .fold(None, |best: Option<(&PitStop, f64)>, (stop, secs)| match best {
            Some((_, best_secs)) if best_secs <= secs => best,
            _ => Some((stop, secs)),
        })
        .map(|(stop, _)| stop)
}

#[derive(Debug, Clone)]
pub struct PitStopsTool;

#[async_trait]
impl F1Tool for PitStopsTool {
    const NAME: &'static str = "get_pitstops";
    const DESCRIPTION: &'static str = "Get F1 pit stop data";
    const FAILURE: &'static str = "Failed to get pit stop data";
    type Params = RaceParams;

    async fn run(params: RaceParams, ctx: &ToolContext) -> ToolResult<Reply> {
        let request = ApiRequest::new("{season}/{round}/pitstops")
            .season(params.season())
            .round(params.round());
        let table = fetch_all_races(ctx.api(), request).await?;
        let race = single_race(table.races, || format!("no race for {}", params.label()))?;
        if race.pit_stops.is_empty() {
            return Err(ToolError::no_data(format!("no pit stops for {}", params.label())));
        }

        let mut out = format!(
            "**{} - Pit Stop Analysis**\n\n**Circuit:** {}\n**Total Pit Stops:** {}\n\n",
            race.race_name,
            race.circuit.circuit_name,
            race.pit_stops.len()
        );

        if let Some(stop) = fastest_stop(&race.pit_stops) {
            let _ = write!(
                out,
                "**Fastest Pit Stop:** {}s by {} (Lap {})\n\n",
                stop.duration.as_deref().unwrap_or("N/A"),
                stop.driver_id.to_uppercase(),
                stop.lap
            );
        }

        let mut by_driver: BTreeMap<&str, Vec<&PitStop>> = BTreeMap::new();
        for stop in &race.pit_stops {
            by_driver.entry(stop.driver_id.as_str()).or_default().push(stop);
        }

        out.push_str("**PIT STOP SUMMARY BY DRIVER:**\n");
        for (driver_id, stops) in &by_driver {
            let timed: Vec<f64> = stops.iter().filter_map(|s| duration_seconds(s)).collect();
            let average = if timed.is_empty() {
                "N/A".to_string()
            } else {
                format!("{:.2}s", timed.iter().sum::<f64>() / timed.len() as f64)
            };
            let _ = writeln!(
                out,
                "**{}:** {} stops, avg {average}",
                driver_id.to_uppercase(),
                stops.len()
            );
            for stop in stops {
                let _ = writeln!(
                    out,
                    "  • Lap {}: {}s",
                    stop.lap,
                    stop.duration.as_deref().unwrap_or("N/A")
                );
            }
            out.push('\n');
        }

        Ok(Reply::Text(out))
    }
}
