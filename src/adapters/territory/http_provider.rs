//! HTTP territory scoring provider.
//!
//! Posts a [`ScoringRequest`] as JSON to `{endpoint}/markets/score` with a
//! bearer token and reads back the ranked markets. Transient failures are
//! retried with exponential backoff.
//!
//! ```ignore
//! let config = HttpScoringConfig::new("https://scoring.example.com/v1", api_key)
//!     .with_timeout(Duration::from_secs(30));
//! let provider = HttpTerritoryScoringProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;

use crate::config::{TerritoryConfig, RETRY_BASE_DELAY_SECS};
use crate::domain::territory::RawMarketScore;
use crate::ports::{ScoringProviderError, ScoringRequest, TerritoryScoringProvider};

const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

/// Configuration for the HTTP scoring provider.
#[derive(Debug, Clone)]
pub struct HttpScoringConfig {
    api_key: Secret<String>,
    pub endpoint: String,
    pub timeout: Duration,
    pub max_retries: u32,
    /// First backoff delay; doubles on every retry.
    pub retry_base_delay: Duration,
}

impl HttpScoringConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(15),
            max_retries: 2,
            retry_base_delay: Duration::from_secs(RETRY_BASE_DELAY_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

impl From<&TerritoryConfig> for HttpScoringConfig {
    fn from(config: &TerritoryConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
            timeout: config.timeout(),
            max_retries: config.max_retries,
            retry_base_delay: Duration::from_secs(RETRY_BASE_DELAY_SECS),
        }
    }
}

/// Scoring provider backed by the external HTTP service.
pub struct HttpTerritoryScoringProvider {
    config: HttpScoringConfig,
    client: Client,
}

impl HttpTerritoryScoringProvider {
    pub fn new(config: HttpScoringConfig) -> Result<Self, ScoringProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ScoringProviderError::unavailable(format!("HTTP client setup: {}", e)))?;

        Ok(Self { config, client })
    }

    fn score_url(&self) -> String {
        format!("{}/markets/score", self.config.endpoint.trim_end_matches('/'))
    }

    async fn send_once(
        &self,
        request: &ScoringRequest,
    ) -> Result<Vec<RawMarketScore>, ScoringProviderError> {
        let response = self
            .client
            .post(self.score_url())
            .bearer_auth(self.config.api_key())
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let response = Self::check_status(response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        parse_markets(&body)
    }

    fn map_transport_error(&self, err: reqwest::Error) -> ScoringProviderError {
        if err.is_timeout() {
            ScoringProviderError::Timeout(self.config.timeout.as_secs())
        } else if err.is_connect() {
            ScoringProviderError::unavailable(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            ScoringProviderError::InvalidResponse(err.to_string())
        } else {
            ScoringProviderError::unavailable(err.to_string())
        }
    }

    async fn check_status(response: Response) -> Result<Response, ScoringProviderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.unwrap_or_default();

        Err(status_error(status, retry_after.as_deref(), &body))
    }
}

#[async_trait]
impl TerritoryScoringProvider for HttpTerritoryScoringProvider {
    async fn score_markets(
        &self,
        request: ScoringRequest,
    ) -> Result<Vec<RawMarketScore>, ScoringProviderError> {
        let mut attempt = 0;

        loop {
            match self.send_once(&request).await {
                Ok(markets) => {
                    tracing::debug!(
                        territory = %request.territory,
                        markets = markets.len(),
                        attempt,
                        "territory scoring succeeded"
                    );
                    return Ok(markets);
                }
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    // Exponential backoff: base, 2x base, 4x base, ...
                    let delay = self.config.retry_base_delay * 2u32.saturating_pow(attempt);
                    tracing::warn!(
                        territory = %request.territory,
                        error = %err,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "territory scoring failed, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "http"
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScoringResponse {
    Wrapped { markets: Vec<RawMarketScore> },
    Bare(Vec<RawMarketScore>),
}

/// Parses a response body; accepts `{"markets": [...]}` or a bare array.
fn parse_markets(body: &str) -> Result<Vec<RawMarketScore>, ScoringProviderError> {
    match serde_json::from_str::<ScoringResponse>(body) {
        Ok(ScoringResponse::Wrapped { markets }) | Ok(ScoringResponse::Bare(markets)) => {
            Ok(markets)
        }
        Err(e) => Err(ScoringProviderError::InvalidResponse(e.to_string())),
    }
}

fn status_error(status: StatusCode, retry_after: Option<&str>, body: &str) -> ScoringProviderError {
    match status.as_u16() {
        429 => ScoringProviderError::RateLimited {
            retry_after_secs: retry_after
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS),
        },
        408 | 504 => ScoringProviderError::unavailable(format!("Gateway timeout {}", status)),
        401 | 403 => {
            ScoringProviderError::unavailable("authentication with scoring provider failed")
        }
        500..=599 => {
            ScoringProviderError::unavailable(format!("Server error {}: {}", status, body))
        }
        _ => {
            ScoringProviderError::InvalidResponse(format!("Unexpected status {}: {}", status, body))
        }
    }
}
