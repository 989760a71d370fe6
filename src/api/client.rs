//! HTTP client for the Ergast-compatible upstream.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use super::error::{ApiError, ApiResult};
use super::model::{MrData, decode_body};
use super::request::ApiRequest;
use crate::core::config::UpstreamConfig;

/// Longest slice of an error body kept in a `Status` error.
const MAX_ERROR_BODY: usize = 200;

/// Source of upstream data.
///
/// Tool handlers depend on this trait, not on the concrete HTTP client, so
/// they can be exercised against canned responses.
#[async_trait]
pub trait ErgastApi: Send + Sync {
    /// Fetch one resource and return the decoded `MRData` body.
    async fn get(&self, request: &ApiRequest) -> ApiResult<MrData>;
}

/// reqwest-backed implementation of [`ErgastApi`].
#[derive(Debug, Clone)]
pub struct ErgastClient {
    http: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl ErgastClient {
    /// Build a client for the configured base URL and timeout.
    pub fn new(config: &UpstreamConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::invalid_request(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a request: `{base}/{path}.json[?query]`.
    pub fn url_for(&self, request: &ApiRequest) -> ApiResult<String> {
        let path = request.path()?;
        let mut url = if path.is_empty() {
            format!("{}.json", self.base_url)
        } else {
            format!("{}/{}.json", self.base_url, path)
        };
        if let Some(query) = request.query()? {
            url.push('?');
            url.push_str(&query);
        }
        Ok(url)
    }

    fn classify(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(self.timeout_secs)
        } else if err.is_connect() {
            ApiError::unreachable(format!("connection failed: {err}"))
        } else if err.is_builder() {
            ApiError::invalid_request(err.to_string())
        } else {
            ApiError::unreachable(err.to_string())
        }
    }
}

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(MAX_ERROR_BODY).collect();
    cut.push('…');
    cut
}

#[async_trait]
impl ErgastApi for ErgastClient {
    #[instrument(skip(self, request), fields(url = tracing::field::Empty))]
    async fn get(&self, request: &ApiRequest) -> ApiResult<MrData> {
        let url = self.url_for(request)?;
        tracing::Span::current().record("url", url.as_str());
        let started = Instant::now();

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Upstream returned {} for {}", status, url);
            return Err(ApiError::status(status.as_u16(), truncate_body(&body)));
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        debug!(
            "Upstream response received: {} bytes in {:?}",
            bytes.len(),
            started.elapsed()
        );

        let data = decode_body(&bytes)?;
        info!("Fetched {} (total {})", url, data.total());
        Ok(data)
    }
}
