//! GetTerritoryAnalysisHandler - Query handler for a stored territory ranking.

use std::sync::Arc;

use crate::domain::foundation::{Repository, TerritoryAnalysisId, UserId};
use crate::domain::territory::{TerritoryAnalysis, TerritoryError};
use crate::ports::TerritoryAnalysisRepository;

/// Query to get a territory analysis by ID.
#[derive(Debug, Clone)]
pub struct GetTerritoryAnalysisQuery {
    pub analysis_id: TerritoryAnalysisId,
    pub user_id: UserId,
}

/// Handler for retrieving territory analyses.
pub struct GetTerritoryAnalysisHandler {
    repository: Arc<dyn TerritoryAnalysisRepository>,
}

impl GetTerritoryAnalysisHandler {
    pub fn new(repository: Arc<dyn TerritoryAnalysisRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetTerritoryAnalysisQuery,
    ) -> Result<TerritoryAnalysis, TerritoryError> {
        let analysis = self
            .repository
            .find_by_id(query.analysis_id)
            .await?
            .ok_or(TerritoryError::NotFound(query.analysis_id))?;

        if !analysis.is_owned_by(&query.user_id) {
            return Err(TerritoryError::Forbidden);
        }

        Ok(analysis)
    }
}
