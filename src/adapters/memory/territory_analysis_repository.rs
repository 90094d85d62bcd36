use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, Repository, TerritoryAnalysisId, UserId,
};
use crate::domain::territory::TerritoryAnalysis;
use crate::ports::TerritoryAnalysisRepository;

/// In-memory implementation of TerritoryAnalysisRepository.
#[derive(Default)]
pub struct InMemoryTerritoryAnalysisRepository {
    analyses: RwLock<HashMap<TerritoryAnalysisId, TerritoryAnalysis>>,
}

impl InMemoryTerritoryAnalysisRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<TerritoryAnalysis, TerritoryAnalysisId> for InMemoryTerritoryAnalysisRepository {
    async fn find_by_id(
        &self,
        id: TerritoryAnalysisId,
    ) -> Result<Option<TerritoryAnalysis>, DomainError> {
        Ok(self.analyses.read().await.get(&id).cloned())
    }

    async fn save(&self, analysis: &TerritoryAnalysis) -> Result<(), DomainError> {
        self.analyses
            .write()
            .await
            .insert(analysis.id(), analysis.clone());
        Ok(())
    }

    async fn update(&self, analysis: &TerritoryAnalysis) -> Result<(), DomainError> {
        match self.analyses.write().await.get_mut(&analysis.id()) {
            Some(existing) => {
                *existing = analysis.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::TerritoryAnalysisNotFound,
                format!("Territory analysis not found: {}", analysis.id()),
            )),
        }
    }

    async fn delete(&self, id: TerritoryAnalysisId) -> Result<(), DomainError> {
        self.analyses.write().await.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl TerritoryAnalysisRepository for InMemoryTerritoryAnalysisRepository {
    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<TerritoryAnalysis>, DomainError> {
        let mut found: Vec<TerritoryAnalysis> = self
            .analyses
            .read()
            .await
            .values()
            .filter(|a| a.is_owned_by(owner))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::territory::RawMarketScore;

    #[tokio::test]
    async fn save_and_find_by_owner() {
        let repo = InMemoryTerritoryAnalysisRepository::new();
        let owner = UserId::new("u1").unwrap();
        let analysis = TerritoryAnalysis::from_provider(
            owner.clone(),
            "Front Range",
            vec![],
            vec![RawMarketScore::new("Fort Collins, CO", 77.0)],
        )
        .unwrap();

        repo.save(&analysis).await.unwrap();

        assert_eq!(repo.find_by_id(analysis.id()).await.unwrap(), Some(analysis.clone()));
        assert_eq!(repo.find_by_owner(&owner).await.unwrap().len(), 1);
        assert!(repo
            .find_by_owner(&UserId::new("u2").unwrap())
            .await
            .unwrap()
            .is_empty());
    }
}
