//! ListTerritoryAnalysesHandler - Query handler for a user's territory analyses.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::territory::{TerritoryAnalysis, TerritoryError};
use crate::ports::TerritoryAnalysisRepository;

/// Query to list the caller's analyses, newest first.
#[derive(Debug, Clone)]
pub struct ListTerritoryAnalysesQuery {
    pub user_id: UserId,
    pub limit: Option<usize>,
}

pub struct ListTerritoryAnalysesHandler {
    repository: Arc<dyn TerritoryAnalysisRepository>,
}

impl ListTerritoryAnalysesHandler {
    pub fn new(repository: Arc<dyn TerritoryAnalysisRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListTerritoryAnalysesQuery,
    ) -> Result<Vec<TerritoryAnalysis>, TerritoryError> {
        let mut analyses = self.repository.find_by_owner(&query.user_id).await?;
        if let Some(limit) = query.limit {
            analyses.truncate(limit);
        }
        Ok(analyses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryTerritoryAnalysisRepository;
    use crate::domain::foundation::Repository;
    use crate::domain::territory::RawMarketScore;

    async fn seeded() -> Arc<InMemoryTerritoryAnalysisRepository> {
        let repo = Arc::new(InMemoryTerritoryAnalysisRepository::new());
        for (owner, territory) in [("u1", "Boise"), ("u1", "Spokane"), ("u2", "Reno")] {
            let analysis = TerritoryAnalysis::from_provider(
                UserId::new(owner).unwrap(),
                territory,
                vec![],
                vec![RawMarketScore::new(format!("{} Downtown", territory), 70.0)],
            )
            .unwrap();
            repo.save(&analysis).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn lists_only_callers_analyses() {
        let handler = ListTerritoryAnalysesHandler::new(seeded().await);

        let analyses = handler
            .handle(ListTerritoryAnalysesQuery {
                user_id: UserId::new("u1").unwrap(),
                limit: None,
            })
            .await
            .unwrap();

        assert_eq!(analyses.len(), 2);
        assert!(analyses.iter().all(|a| a.territory() != "Reno"));
    }

    #[tokio::test]
    async fn limit_truncates() {
        let handler = ListTerritoryAnalysesHandler::new(seeded().await);

        let analyses = handler
            .handle(ListTerritoryAnalysesQuery {
                user_id: UserId::new("u1").unwrap(),
                limit: Some(1),
            })
            .await
            .unwrap();

        assert_eq!(analyses.len(), 1);
    }
}
