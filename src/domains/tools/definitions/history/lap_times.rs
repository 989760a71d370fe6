//! Lap time sample for a race.

use std::fmt::Write as _;

use async_trait::async_trait;

use crate::api::model::Lap;
use crate::api::{ApiRequest, fetch_all_races};
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::{RaceParams, single_race, time_seconds};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{F1Tool, Reply};

const SAMPLE_LAPS: usize = 5;
const SAMPLE_DRIVERS: usize = 5;

/// Fastest timing across all laps as `(lap number, driver id, time)`.
pub fn fastest_lap(laps: &[Lap]) -> Option<(&str, &str, &str)> {
    let mut best: Option<((&str, &str, &str), f64)> = None;
    for lap in laps {
        for timing in &lap.timings {
            let Some(secs) = time_seconds(&timing.time) else {
                continue;
            };
            match best {
                Some((_, best_secs)) if best_secs <= secs => {}
                _ => {
                    best = Some((
                        (lap.number.as_str(), timing.driver_id.as_str(), timing.time.as_str()),
                        secs,
                    ))
                }
            }
        }
    }
    best.map(|(found, _)| found)
}

#[derive(Debug, Clone)]
pub struct LapTimesTool;

#[async_trait]
impl F1Tool for LapTimesTool {
    const NAME: &'static str = "get_lap_times";
    const DESCRIPTION: &'static str = "Get F1 lap times";
    const FAILURE: &'static str = "Failed to get lap times";
    type Params = RaceParams;

    async fn run(params: RaceParams, ctx: &ToolContext) -> ToolResult<Reply> {
        let request = ApiRequest::new("{season}/{round}/laps")
            .season(params.season())
            .round(params.round());
        let table = fetch_all_races(ctx.api(), request).await?;
        let race = single_race(table.races, || format!("no race for {}", params.label()))?;
        if race.laps.is_empty() {
            return Err(ToolError::no_data(format!("no lap times for {}", params.label())));
        }

        let mut out = format!(
            "**{} - Lap Time Analysis**\n\n**Circuit:** {}\n**Total Laps:** {}\n\n",
            race.race_name,
            race.circuit.circuit_name,
            race.laps.len()
        );

        if let Some((lap, driver, time)) = fastest_lap(&race.laps) {
            let _ = write!(
                out,
                "**Fastest Lap:** {time} by {} (Lap {lap})\n\n",
                driver.to_uppercase()
            );
        }

        let _ = writeln!(out, "**SAMPLE LAP TIMES (First {SAMPLE_LAPS} Laps):**");
        for lap in race.laps.iter().take(SAMPLE_LAPS) {
            let _ = writeln!(out, "**Lap {}:**", lap.number);
            for timing in lap.timings.iter().take(SAMPLE_DRIVERS) {
                let _ = writeln!(
                    out,
                    "  P{} {}: {}",
                    timing.position.as_deref().unwrap_or("-"),
                    timing.driver_id.to_uppercase(),
                    timing.time
                );
            }
            out.push('\n');
        }

        if race.laps.len() > SAMPLE_LAPS {
            let _ = writeln!(out, "... and {} more laps", race.laps.len() - SAMPLE_LAPS);
        }

        Ok(Reply::Text(out))
    }
}
