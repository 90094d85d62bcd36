//! Mock territory scoring provider.
//!
//! Scripted responses are consumed in order. When the script is empty the
//! provider answers with a deterministic sample ranking derived from the
//! request, so the service stays usable without an external provider.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::territory::RawMarketScore;
use crate::ports::{ScoringProviderError, ScoringRequest, TerritoryScoringProvider};

const SAMPLE_MARKETS: [&str; 6] = ["Downtown", "North", "South", "East", "West", "Airport"];

/// Mock scoring provider for development and tests.
#[derive(Debug, Clone, Default)]
pub struct MockTerritoryScoringProvider {
    responses: Arc<Mutex<VecDeque<Result<Vec<RawMarketScore>, ScoringProviderError>>>>,
    calls: Arc<Mutex<Vec<ScoringRequest>>>,
}

impl MockTerritoryScoringProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_markets(self, markets: Vec<RawMarketScore>) -> Self {
        self.push(Ok(markets));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: ScoringProviderError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, response: Result<Vec<RawMarketScore>, ScoringProviderError>) {
        // Builders run before the provider is shared, so the lock is free.
        if let Ok(mut responses) = self.responses.try_lock() {
            responses.push_back(response);
        }
    }

    /// Requests received so far.
    pub async fn calls(&self) -> Vec<ScoringRequest> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    fn sample_ranking(request: &ScoringRequest) -> Vec<RawMarketScore> {
        let seed = request
            .territory
            .bytes()
            .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));

        SAMPLE_MARKETS
            .iter()
            .take(request.max_markets as usize)
            .enumerate()
            .map(|(i, suffix)| {
                let spread = (seed.wrapping_add(i as u32 * 17) % 40) as f64;
                let market = format!("{} {}", request.territory.trim(), suffix);
                RawMarketScore::new(market, 55.0 + spread)
                    .with_reasoning(format!(
                        "Sample score weighing {}",
                        if request.criteria.is_empty() {
                            "general retail demand".to_string()
                        } else {
                            request.criteria.join(", ")
                        }
                    ))
                    .with_source("mock-provider")
            })
            .collect()
    }
}

#[async_trait]
impl TerritoryScoringProvider for MockTerritoryScoringProvider {
    async fn score_markets(
        &self,
        request: ScoringRequest,
    ) -> Result<Vec<RawMarketScore>, ScoringProviderError> {
        self.calls.lock().await.push(request.clone());

        match self.responses.lock().await.pop_front() {
            Some(response) => response,
            None => Ok(Self::sample_ranking(&request)),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
