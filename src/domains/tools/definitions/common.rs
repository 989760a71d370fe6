//! Common params and formatting helpers shared across F1 tools.

use chrono::{NaiveDate, NaiveTime};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::api::model::{Race, RaceResult};
use crate::api::{DriverId, Round, Season};
use crate::domains::tools::error::{ToolError, ToolResult};

/// Optional season argument.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SeasonParams {
    /// Season year; omit (or 0) for the current season.
    #[schemars(description = "Season year (e.g., 2023, 2022, 2021) or leave empty for current season")]
    #[serde(default)]
    pub year: Option<u16>,
}

impl SeasonParams {
    pub fn season(&self) -> Season {
        Season::from_arg(self.year)
    }
}

/// Optional season plus optional round.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct RaceParams {
    #[schemars(description = "Season year (e.g., 2024, 2023) or leave empty for current season")]
    #[serde(default)]
    pub year: Option<u16>,

    #[schemars(description = "Race round number (1-24); leave empty or 0 for the last race")]
    #[serde(default, alias = "round")]
    pub round_num: Option<u32>,
}

impl RaceParams {
    pub fn season(&self) -> Season {
        Season::from_arg(self.year)
    }

    pub fn round(&self) -> Round {
        Round::from_arg(self.round_num)
    }

    /// "2023 round 5" / "current season round last".
    pub fn label(&self) -> String {
        format!("{} round {}", self.season().label(), self.round())
    }
}

/// Validate a driver identifier argument.
pub fn driver_arg(param: &str, raw: &str) -> ToolResult<DriverId> {
    DriverId::parse(raw).map_err(|reason| ToolError::invalid_param(param, reason))
}

/// Take the single race an endpoint is expected to return.
pub fn single_race(races: Vec<Race>, what: impl FnOnce() -> String) -> ToolResult<Race> {
    races
        .into_iter()
        .next()
        .ok_or_else(|| ToolError::no_data(what()))
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// "March 24, 2024 at 04:00 UTC", or the date alone when no time is known.
///
/// Unparsable input is echoed back unchanged.
pub fn format_race_datetime(date: &str, time: Option<&str>) -> String {
    let Some(day) = parse_date(date) else {
        return match time {
            Some(time) => format!("{date} {time}"),
            None => date.to_string(),
        };
    };

    let parsed_time = time.and_then(|t| {
        let t = t.trim_end_matches('Z');
        let t = t.split(['+', '-']).next().unwrap_or(t);
        NaiveTime::parse_from_str(t, "%H:%M:%S").ok()
    });

    match parsed_time {
        Some(time) => day.and_time(time).format("%B %d, %Y at %H:%M UTC").to_string(),
        None => day.format("%B %d, %Y").to_string(),
    }
}

/// Points as a number; upstream sends strings such as "25" or "0.5".
pub fn parse_points(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

/// Render points without a trailing `.0` ("25", "18.5").
pub fn format_points(points: f64) -> String {
    let rounded = (points * 100.0).round() / 100.0;
    format!("{rounded}")
}

/// Classified position, if numeric.
pub fn position_number(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// Sort key placing entries without a numeric position last.
pub fn position_key(position: Option<&str>) -> u32 {
    position.and_then(position_number).unwrap_or(u32::MAX)
}

/// Whether a result status counts as classified at the finish.
///
/// "Finished" and lapped finishes ("+1 Lap", "+3 Laps") count; anything
/// else is a DNF.
pub fn is_finished(status: &str) -> bool {
    let status = status.trim();
    if status == "Finished" {
        return true;
    }
    let Some(rest) = status.strip_prefix('+') else {
        return false;
    };
    let mut parts = rest.split_whitespace();
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(n), Some("Lap" | "Laps"), None) if n.chars().all(|c| c.is_ascii_digit())
    )
}

/// Seconds in a lap or stop time: "1:23.456", "23.456" or "1:02:03.4".
pub fn time_seconds(raw: &str) -> Option<f64> {
    raw.trim()
        .split(':')
        .try_fold(0.0_f64, |acc, part| part.parse::<f64>().ok().map(|v| acc * 60.0 + v))
}

/// Race time when classified on the lead lap, otherwise the status.
pub fn time_or_status(result: &RaceResult) -> String {
    match (&result.time, &result.status) {
        (Some(time), _) => time.time.clone(),
        (None, Some(status)) => status.clone(),
        (None, None) => "N/A".to_string(),
    }
}

/// "P1: Max Verstappen (Red Bull) - 25 pts (1:31:44.742)".
pub fn result_line(result: &RaceResult) -> String {
    format!(
        "P{}: {} ({}) - {} pts ({})",
        result.position,
        result.driver.full_name(),
        result.constructor.name,
        format_points(parse_points(&result.points)),
        time_or_status(result)
    )
}

/// Percentage of `part` in `whole`, 0 when `whole` is 0.
pub fn rate(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole) * 100.0
    }
}
