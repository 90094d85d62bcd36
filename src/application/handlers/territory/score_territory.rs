//! ScoreTerritoryHandler - Command handler for ranking markets in a territory.
//!
//! The provider's output is untrusted; it goes through
//! [`TerritoryAnalysis::from_provider`] and is cut to `max_markets` before
//! anything is stored.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, Repository};
use crate::domain::territory::{TerritoryAnalysis, TerritoryError};
use crate::ports::{
    ScoringRequest, TerritoryAnalysisRepository, TerritoryScoringProvider, DEFAULT_MAX_MARKETS,
};

/// Upper bound on `max_markets` accepted from callers.
pub const MAX_MARKETS_PER_REQUEST: u32 = 50;

/// Command to score the markets inside a territory.
#[derive(Debug, Clone)]
pub struct ScoreTerritoryCommand {
    pub territory: String,
    pub criteria: Vec<String>,
    pub max_markets: Option<u32>,
}

/// Handler for territory scoring.
pub struct ScoreTerritoryHandler {
    provider: Arc<dyn TerritoryScoringProvider>,
    repository: Arc<dyn TerritoryAnalysisRepository>,
}

impl ScoreTerritoryHandler {
    pub fn new(
        provider: Arc<dyn TerritoryScoringProvider>,
        repository: Arc<dyn TerritoryAnalysisRepository>,
    ) -> Self {
        Self {
            provider,
            repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: ScoreTerritoryCommand,
        metadata: CommandMetadata,
    ) -> Result<TerritoryAnalysis, TerritoryError> {
        // 1. Validate before spending a provider call
        if cmd.territory.trim().is_empty() {
            return Err(TerritoryError::validation("territory", "territory cannot be empty"));
        }
        let max_markets = cmd.max_markets.unwrap_or(DEFAULT_MAX_MARKETS);
        if max_markets == 0 || max_markets > MAX_MARKETS_PER_REQUEST {
            return Err(TerritoryError::validation(
                "max_markets",
                format!("must be between 1 and {}", MAX_MARKETS_PER_REQUEST),
            ));
        }

        // 2. Ask the provider
        let request = ScoringRequest::new(cmd.territory.trim())
            .with_criteria(cmd.criteria.clone())
            .with_max_markets(max_markets);

        let raw = self.provider.score_markets(request).await.map_err(|err| {
            tracing::warn!(
                provider = self.provider.provider_name(),
                territory = %cmd.territory,
                error = %err,
                "territory scoring failed"
            );
            TerritoryError::from(err)
        })?;
        let returned = raw.len();

        // 3. Normalize, cap and store
        let mut analysis =
            TerritoryAnalysis::from_provider(metadata.user_id, cmd.territory, cmd.criteria, raw)?;
        analysis.keep_top(max_markets as usize);
        self.repository.save(&analysis).await?;

        tracing::info!(
            analysis_id = %analysis.id(),
            provider = self.provider.provider_name(),
            returned,
            kept = analysis.markets().len(),
            "territory scored"
        );

        Ok(analysis)
    }
}
