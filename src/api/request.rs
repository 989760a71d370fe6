//! Request construction for the upstream API.
//!
//! Requests are described by a path template such as
//! `{season}/{round}/results` plus named parameter values. Rendering
//! substitutes every `{name}` placeholder; the client appends the `.json`
//! suffix and paging query.

use std::fmt;

use serde::Serialize;

use super::error::{ApiError, ApiResult};

/// A championship season, either a concrete year or upstream's `current` alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Current,
    Year(u16),
}

impl Season {
    /// Resolve an optional tool argument; absent or zero means `current`.
    pub fn from_arg(year: Option<u16>) -> Self {
        match year {
            None | Some(0) => Self::Current,
            Some(year) => Self::Year(year),
        }
    }

    /// Human label used in messages ("current season" / "2023").
    pub fn label(&self) -> String {
        match self {
            Self::Current => "current season".to_string(),
            Self::Year(year) => year.to_string(),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => f.write_str("current"),
            Self::Year(year) => write!(f, "{year}"),
        }
    }
}

/// A round within a season, either a number or upstream's `last` alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Round {
    Last,
    Number(u32),
}

impl Round {
    /// Resolve an optional tool argument; absent or zero means `last`.
    pub fn from_arg(round: Option<u32>) -> Self {
        match round {
            None | Some(0) => Self::Last,
            Some(round) => Self::Number(round),
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Last => f.write_str("last"),
            Self::Number(round) => write!(f, "{round}"),
        }
    }
}

/// A driver identifier that is safe to place in a URL path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverId(String);

impl DriverId {
    /// Validate a raw identifier (`hamilton`, `max_verstappen`, ...).
    ///
    /// Identifiers are lowercased; anything other than ASCII letters,
    /// digits and underscores is rejected.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("driver id must not be empty".to_string());
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(format!(
                "driver id '{trimmed}' may only contain letters, digits and underscores"
            ));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
struct Paging {
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<u32>,
}

/// A single upstream GET, described by template and parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    template: &'static str,
    params: Vec<(&'static str, String)>,
    paging: Paging,
}

impl ApiRequest {
    /// Start a request for the given path template.
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            params: Vec::new(),
            paging: Paging::default(),
        }
    }

    /// Bind a named placeholder.
    pub fn param(mut self, name: &'static str, value: impl ToString) -> Self {
        self.params.retain(|(existing, _)| *existing != name);
        self.params.push((name, value.to_string()));
        self
    }

    /// Bind `{season}`.
    pub fn season(self, season: Season) -> Self {
        self.param("season", season)
    }

    /// Bind `{round}`.
    pub fn round(self, round: Round) -> Self {
        self.param("round", round)
    }

    /// Bind `{driver}`.
    pub fn driver(self, driver: &DriverId) -> Self {
        self.param("driver", driver)
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.paging.limit = Some(limit);
        self
    }

    /// Set the page offset.
    pub fn offset(mut self, offset: u32) -> Self {
        self.paging.offset = Some(offset);
        self
    }

    /// Currently requested offset (0 when unset).
    pub fn current_offset(&self) -> u32 {
        self.paging.offset.unwrap_or(0)
    }

    /// Render the path with every placeholder substituted.
    pub fn path(&self) -> ApiResult<String> {
        let mut rendered = String::with_capacity(self.template.len() + 16);
        let mut rest = self.template;

        while let Some(start) = rest.find('{') {
            rendered.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after.find('}').ok_or_else(|| {
                ApiError::invalid_request(format!("unterminated placeholder in '{}'", self.template))
            })?;
            let name = &after[..end];
            let value = self
                .params
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.as_str())
                .ok_or_else(|| {
                    ApiError::invalid_request(format!(
                        "no value bound for '{{{name}}}' in '{}'",
                        self.template
                    ))
                })?;
            rendered.push_str(value);
            rest = &after[end + 1..];
        }
        rendered.push_str(rest);

        Ok(rendered.trim_matches('/').to_string())
    }

    /// Paging query string, if any paging parameter is set.
    pub fn query(&self) -> ApiResult<Option<String>> {
        if self.paging == Paging::default() {
            return Ok(None);
        }
        serde_urlencoded::to_string(self.paging)
            .map(Some)
            .map_err(|e| ApiError::invalid_request(e.to_string()))
    }

    /// Stable key identifying this request (`path` plus query).
    pub fn key(&self) -> ApiResult<String> {
        let path = self.path()?;
        Ok(match self.query()? {
            Some(query) => format!("{path}?{query}"),
            None => path,
        })
    }
}
