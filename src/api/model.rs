//! Typed DTOs for the Ergast response envelope.
//!
//! Every response is wrapped as `{"MRData": {...}}` with exactly one
//! category table inside. Numbers the upstream sends as strings are kept as
//! strings; helpers parse them where a number is needed.

use serde::Deserialize;

use super::error::{ApiError, ApiResult};

/// Top-level wrapper around every upstream response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(rename = "MRData")]
    pub mr_data: MrData,
}

/// The `MRData` body: paging info plus one category table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MrData {
    #[serde(default)]
    pub limit: String,
    #[serde(default)]
    pub offset: String,
    #[serde(default)]
    pub total: String,
    #[serde(rename = "SeasonTable")]
    pub season_table: Option<SeasonTable>,
    #[serde(rename = "CircuitTable")]
    pub circuit_table: Option<CircuitTable>,
    #[serde(rename = "RaceTable")]
    pub race_table: Option<RaceTable>,
    #[serde(rename = "DriverTable")]
    pub driver_table: Option<DriverTable>,
    #[serde(rename = "ConstructorTable")]
    pub constructor_table: Option<ConstructorTable>,
    #[serde(rename = "StandingsTable")]
    pub standings_table: Option<StandingsTable>,
    #[serde(rename = "StatusTable")]
    pub status_table: Option<StatusTable>,
}

fn missing(table: &str) -> ApiError {
    ApiError::decode(format!("response has no {table}"))
}

impl MrData {
    /// Total row count reported by upstream (0 when absent or unparsable).
    pub fn total(&self) -> u32 {
        self.total.parse().unwrap_or(0)
    }

    pub fn into_season_table(self) -> ApiResult<SeasonTable> {
        self.season_table.ok_or_else(|| missing("SeasonTable"))
    }

    pub fn into_circuit_table(self) -> ApiResult<CircuitTable> {
        self.circuit_table.ok_or_else(|| missing("CircuitTable"))
    }

    pub fn into_race_table(self) -> ApiResult<RaceTable> {
        self.race_table.ok_or_else(|| missing("RaceTable"))
    }

    pub fn into_driver_table(self) -> ApiResult<DriverTable> {
        self.driver_table.ok_or_else(|| missing("DriverTable"))
    }

    pub fn into_constructor_table(self) -> ApiResult<ConstructorTable> {
        self.constructor_table
            .ok_or_else(|| missing("ConstructorTable"))
    }

    pub fn into_standings_table(self) -> ApiResult<StandingsTable> {
        self.standings_table.ok_or_else(|| missing("StandingsTable"))
    }

    pub fn into_status_table(self) -> ApiResult<StatusTable> {
        self.status_table.ok_or_else(|| missing("StatusTable"))
    }
}

/// Decode a raw response body into the envelope contents.
pub fn decode_body(body: &[u8]) -> ApiResult<MrData> {
    serde_json::from_slice::<Envelope>(body)
        .map(|envelope| envelope.mr_data)
        .map_err(|e| ApiError::decode(e.to_string()))
}

// ============================================================================
// Tables
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonTable {
    #[serde(rename = "Seasons", default)]
    pub seasons: Vec<SeasonEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonEntry {
    pub season: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CircuitTable {
    #[serde(rename = "Circuits", default)]
    pub circuits: Vec<Circuit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RaceTable {
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub round: Option<String>,
    #[serde(rename = "Races", default)]
    pub races: Vec<Race>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriverTable {
    #[serde(default)]
    pub season: Option<String>,
    #[serde(rename = "Drivers", default)]
    pub drivers: Vec<Driver>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConstructorTable {
    #[serde(default)]
    pub season: Option<String>,
    #[serde(rename = "Constructors", default)]
    pub constructors: Vec<Constructor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StandingsTable {
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub round: Option<String>,
    #[serde(rename = "StandingsLists", default)]
    pub standings_lists: Vec<StandingsList>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusTable {
    #[serde(rename = "Status", default)]
    pub statuses: Vec<StatusEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    pub status_id: String,
    #[serde(default)]
    pub count: String,
    pub status: String,
}

// ============================================================================
// Entities
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circuit {
    pub circuit_id: String,
    #[serde(default)]
    pub url: Option<String>,
    pub circuit_name: String,
    #[serde(rename = "Location")]
    pub location: Location,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub long: Option<String>,
    pub locality: String,
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub driver_id: String,
    #[serde(default)]
    pub permanent_number: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    pub given_name: String,
    pub family_name: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
}

impl Driver {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constructor {
    pub constructor_id: String,
    #[serde(default)]
    pub url: Option<String>,
    pub name: String,
    #[serde(default)]
    pub nationality: Option<String>,
}

/// A race weekend, optionally carrying one kind of nested session data.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Race {
    pub season: String,
    pub round: String,
    #[serde(default)]
    pub url: Option<String>,
    pub race_name: String,
    #[serde(rename = "Circuit")]
    pub circuit: Circuit,
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(rename = "Results", default)]
    pub results: Vec<RaceResult>,
    #[serde(rename = "SprintResults", default)]
    pub sprint_results: Vec<RaceResult>,
    #[serde(rename = "QualifyingResults", default)]
    pub qualifying_results: Vec<QualifyingResult>,
    #[serde(rename = "PitStops", default)]
    pub pit_stops: Vec<PitStop>,
    #[serde(rename = "Laps", default)]
    pub laps: Vec<Lap>,
}

impl Race {
    /// Round as a number (0 when unparsable).
    pub fn round_number(&self) -> u32 {
        self.round.parse().unwrap_or(0)
    }

    /// Whether `other` describes the same weekend.
    pub fn same_weekend(&self, other: &Race) -> bool {
        self.season == other.season && self.round == other.round
    }

    /// Fold the nested rows of a continuation page into this race.
    ///
    /// A lap split across the page boundary has its timings concatenated.
    pub fn absorb(&mut self, other: Race) {
        self.results.extend(other.results);
        self.sprint_results.extend(other.sprint_results);
        self.qualifying_results.extend(other.qualifying_results);
        self.pit_stops.extend(other.pit_stops);

        let mut laps = other.laps.into_iter();
        if let (Some(last), Some(first)) = (self.laps.last_mut(), laps.as_slice().first()) {
            if last.number == first.number {
                if let Some(first) = laps.next() {
                    last.timings.extend(first.timings);
                }
            }
        }
        self.laps.extend(laps);
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceResult {
    #[serde(default)]
    pub number: Option<String>,
    pub position: String,
    #[serde(default)]
    pub position_text: Option<String>,
    #[serde(default)]
    pub points: String,
    #[serde(rename = "Driver")]
    pub driver: Driver,
    #[serde(rename = "Constructor")]
    pub constructor: Constructor,
    #[serde(default)]
    pub grid: Option<String>,
    #[serde(default)]
    pub laps: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "Time", default)]
    pub time: Option<ResultTime>,
    #[serde(rename = "FastestLap", default)]
    pub fastest_lap: Option<FastestLap>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultTime {
    #[serde(default)]
    pub millis: Option<String>,
    pub time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FastestLap {
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub lap: Option<String>,
    #[serde(rename = "Time", default)]
    pub time: Option<LapTime>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LapTime {
    pub time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QualifyingResult {
    #[serde(default)]
    pub number: Option<String>,
    pub position: String,
    #[serde(rename = "Driver")]
    pub driver: Driver,
    #[serde(rename = "Constructor")]
    pub constructor: Constructor,
    #[serde(rename = "Q1", default)]
    pub q1: Option<String>,
    #[serde(rename = "Q2", default)]
    pub q2: Option<String>,
    #[serde(rename = "Q3", default)]
    pub q3: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitStop {
    pub driver_id: String,
    pub lap: String,
    pub stop: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Lap {
    pub number: String,
    #[serde(rename = "Timings", default)]
    pub timings: Vec<Timing>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    pub driver_id: String,
    #[serde(default)]
    pub position: Option<String>,
    pub time: String,
}

// ============================================================================
// Standings
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct StandingsList {
    pub season: String,
    #[serde(default)]
    pub round: Option<String>,
    #[serde(rename = "DriverStandings", default)]
    pub driver_standings: Vec<DriverStanding>,
    #[serde(rename = "ConstructorStandings", default)]
    pub constructor_standings: Vec<ConstructorStanding>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverStanding {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub position_text: Option<String>,
    pub points: String,
    pub wins: String,
    #[serde(rename = "Driver")]
    pub driver: Driver,
    #[serde(rename = "Constructors", default)]
    pub constructors: Vec<Constructor>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorStanding {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub position_text: Option<String>,
    pub points: String,
    pub wins: String,
    #[serde(rename = "Constructor")]
    pub constructor: Constructor,
}
