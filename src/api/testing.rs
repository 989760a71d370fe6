//! In-memory upstream for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::client::ErgastApi;
use super::error::{ApiError, ApiResult};
use super::model::{MrData, decode_body};
use super::request::ApiRequest;

#[derive(Debug, Clone)]
enum FakeResponse {
    Json(String),
    Status(u16),
    Unreachable,
}

/// Canned responses keyed by [`ApiRequest::key`], plus a log of every call.
///
/// Unknown keys answer HTTP 404, mirroring the upstream for bad paths.
#[derive(Debug, Default)]
pub struct FakeApi {
    responses: HashMap<String, FakeResponse>,
    offline: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fake where every request fails as if the host were down.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn with_json(mut self, key: &str, body: Value) -> Self {
        self.responses
            .insert(key.to_string(), FakeResponse::Json(body.to_string()));
        self
    }

    pub fn with_raw(mut self, key: &str, body: &str) -> Self {
        self.responses
            .insert(key.to_string(), FakeResponse::Json(body.to_string()));
        self
    }

    pub fn with_status(mut self, key: &str, status: u16) -> Self {
        self.responses
            .insert(key.to_string(), FakeResponse::Status(status));
        self
    }

    pub fn with_unreachable(mut self, key: &str) -> Self {
        self.responses
            .insert(key.to_string(), FakeResponse::Unreachable);
        self
    }

    /// Keys requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ErgastApi for FakeApi {
    async fn get(&self, request: &ApiRequest) -> ApiResult<MrData> {
        let key = request.key()?;
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(key.clone());
        }
        if self.offline {
            return Err(ApiError::unreachable("connection refused"));
        }
        match self.responses.get(&key) {
            Some(FakeResponse::Json(body)) => decode_body(body.as_bytes()),
            Some(FakeResponse::Status(status)) => Err(ApiError::status(*status, "")),
            Some(FakeResponse::Unreachable) => Err(ApiError::unreachable("connection refused")),
            None => Err(ApiError::status(404, format!("no fixture for {key}"))),
        }
    }
}

/// JSON builders shaped like upstream responses.
pub mod fixtures {
    use serde_json::{Value, json};

    fn envelope(total: usize, table_name: &str, table: Value) -> Value {
        let mut mr_data = json!({
            "limit": "100",
            "offset": "0",
            "total": total.to_string(),
        });
        mr_data[table_name] = table;
        json!({ "MRData": mr_data })
    }

    pub fn driver(id: &str) -> Value {
        let (given, family) = match id {
            "hamilton" => ("Lewis", "Hamilton"),
            "max_verstappen" => ("Max", "Verstappen"),
            "leclerc" => ("Charles", "Leclerc"),
            "norris" => ("Lando", "Norris"),
            _ => ("Test", id),
        };
        json!({
            "driverId": id,
            "permanentNumber": "44",
            "code": id.chars().take(3).collect::<String>().to_uppercase(),
            "givenName": given,
            "familyName": family,
            "dateOfBirth": "1985-01-07",
            "nationality": "British",
        })
    }

    pub fn constructor(id: &str) -> Value {
        json!({ "constructorId": id, "name": format!("{id} F1"), "nationality": "British" })
    }

    fn circuit() -> Value {
        json!({
            "circuitId": "silverstone",
            "circuitName": "Silverstone Circuit",
            "Location": { "locality": "Silverstone", "country": "UK" },
        })
    }

    pub fn race(season: &str, round: &str, date: &str) -> Value {
        json!({
            "season": season,
            "round": round,
            "raceName": format!("Round {round} Grand Prix"),
            "Circuit": circuit(),
            "date": date,
            "time": "14:00:00Z",
        })
    }

    pub fn race_with_results(season: &str, round: &str, date: &str, results: Vec<Value>) -> Value {
        let mut race = race(season, round, date);
        race["Results"] = Value::Array(results);
        race
    }

    pub fn result(driver_id: &str, position: &str, points: &str, status: &str) -> Value {
        json!({
            "number": "1",
            "position": position,
            "positionText": position,
            "points": points,
            "Driver": driver(driver_id),
            "Constructor": constructor("team"),
            "grid": position,
            "laps": "57",
            "status": status,
        })
    }

    pub fn race_table(total: usize, races: Vec<Value>) -> Value {
        envelope(total, "RaceTable", json!({ "Races": races }))
    }

    pub fn schedule(races: Vec<Value>) -> Value {
        race_table(races.len(), races)
    }

    pub fn driver_table(drivers: Vec<Value>) -> Value {
        envelope(drivers.len(), "DriverTable", json!({ "Drivers": drivers }))
    }

    pub fn driver_standing(driver_id: &str, position: &str, points: &str, wins: &str) -> Value {
        json!({
            "position": position,
            "positionText": position,
            "points": points,
            "wins": wins,
            "Driver": driver(driver_id),
            "Constructors": [constructor("team")],
        })
    }

    pub fn driver_standings(season: &str, standings: Vec<Value>) -> Value {
        let lists = if standings.is_empty() {
            vec![]
        } else {
            vec![json!({ "season": season, "round": "22", "DriverStandings": standings })]
        };
        envelope(
            lists.len(),
            "StandingsTable",
            json!({ "season": season, "StandingsLists": lists }),
        )
    }
}
