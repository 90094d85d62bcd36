//! Territory scoring provider port.
//!
//! Abstracts the external service that ranks markets inside a territory.
//! Providers return raw scores; normalization happens in
//! [`TerritoryAnalysis::from_provider`].
//!
//! [`TerritoryAnalysis::from_provider`]: crate::domain::territory::TerritoryAnalysis::from_provider

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::territory::{RawMarketScore, TerritoryError};

/// Default number of markets requested when the caller does not say.
pub const DEFAULT_MAX_MARKETS: u32 = 10;

/// Port for external market scoring.
#[async_trait]
pub trait TerritoryScoringProvider: Send + Sync {
    /// Score candidate markets inside a territory.
    async fn score_markets(
        &self,
        request: ScoringRequest,
    ) -> Result<Vec<RawMarketScore>, ScoringProviderError>;

    /// Short provider name for logs.
    fn provider_name(&self) -> &'static str;
}

/// What to score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRequest {
    /// Free-form territory, e.g. "Mountain West" or "Greater Phoenix".
    pub territory: String,
    /// Criteria the provider should weigh.
    pub criteria: Vec<String>,
    pub max_markets: u32,
}

impl ScoringRequest {
    pub fn new(territory: impl Into<String>) -> Self {
        Self {
            territory: territory.into(),
            criteria: Vec::new(),
            max_markets: DEFAULT_MAX_MARKETS,
        }
    }

    pub fn with_criteria(mut self, criteria: Vec<String>) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn with_max_markets(mut self, max_markets: u32) -> Self {
        self.max_markets = max_markets;
        self
    }
}

/// Provider failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringProviderError {
    /// Provider is down or returned a server error.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Response could not be parsed into market scores.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Request exceeded the configured timeout.
    #[error("request timed out after {0}s")]
    Timeout(u64),
}

impl ScoringProviderError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        ScoringProviderError::Unavailable {
            message: message.into(),
        }
    }

    /// Whether a later retry may succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ScoringProviderError::InvalidResponse(_))
    }
}

impl From<ScoringProviderError> for TerritoryError {
    fn from(err: ScoringProviderError) -> Self {
        TerritoryError::Provider(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn TerritoryScoringProvider) {}
    }

    #[test]
    fn request_builder_sets_fields() {
        let request = ScoringRequest::new("Greater Phoenix")
            .with_criteria(vec!["household income".to_string()])
            .with_max_markets(5);

        assert_eq!(request.territory, "Greater Phoenix");
        assert_eq!(request.criteria.len(), 1);
        assert_eq!(request.max_markets, 5);
    }

    #[test]
    fn invalid_response_is_not_retryable() {
        assert!(!ScoringProviderError::InvalidResponse("bad json".to_string()).is_retryable());
        assert!(ScoringProviderError::Timeout(30).is_retryable());
        assert!(ScoringProviderError::RateLimited { retry_after_secs: 5 }.is_retryable());
    }

    #[test]
    fn errors_display() {
        assert_eq!(
            ScoringProviderError::unavailable("502").to_string(),
            "provider unavailable: 502"
        );
    }

    #[test]
    fn converts_into_territory_error() {
        let err: TerritoryError = ScoringProviderError::Timeout(45).into();
        assert_eq!(err, TerritoryError::Provider("request timed out after 45s".to_string()));
    }
}
