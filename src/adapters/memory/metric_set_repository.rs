use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::assessment::MetricSet;
use crate::domain::foundation::{DomainError, ErrorCode, MetricSetId, Repository, UserId};
use crate::ports::MetricSetRepository;

/// In-memory implementation of MetricSetRepository.
#[derive(Default)]
pub struct InMemoryMetricSetRepository {
    sets: RwLock<HashMap<MetricSetId, MetricSet>>,
}

impl InMemoryMetricSetRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<MetricSet, MetricSetId> for InMemoryMetricSetRepository {
    async fn find_by_id(&self, id: MetricSetId) -> Result<Option<MetricSet>, DomainError> {
        Ok(self.sets.read().await.get(&id).cloned())
    }

    async fn save(&self, set: &MetricSet) -> Result<(), DomainError> {
        let mut sets = self.sets.write().await;
        if sets.contains_key(&set.id()) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Metric set already exists: {}", set.id()),
            ));
        }
        sets.insert(set.id(), set.clone());
        Ok(())
    }

    async fn update(&self, set: &MetricSet) -> Result<(), DomainError> {
        match self.sets.write().await.get_mut(&set.id()) {
            Some(existing) => {
                *existing = set.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::MetricSetNotFound,
                format!("Metric set not found: {}", set.id()),
            )),
        }
    }

    async fn delete(&self, id: MetricSetId) -> Result<(), DomainError> {
        self.sets
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::MetricSetNotFound,
                    format!("Metric set not found: {}", id),
                )
            })
    }
}

#[async_trait]
impl MetricSetRepository for InMemoryMetricSetRepository {
    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<MetricSet>, DomainError> {
        let mut sets: Vec<MetricSet> = self
            .sets
            .read()
            .await
            .values()
            .filter(|s| s.is_owned_by(owner))
            .cloned()
            .collect();
        sets.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(owner: &str, name: &str) -> MetricSet {
        MetricSet::new(UserId::new(owner).unwrap(), name, None, vec![]).unwrap()
    }

    #[tokio::test]
    async fn save_then_find() {
        let repo = InMemoryMetricSetRepository::new();
        let s = set("u1", "Urban");

        repo.save(&s).await.unwrap();

        assert_eq!(repo.find_by_id(s.id()).await.unwrap(), Some(s.clone()));
        assert!(repo.exists(s.id()).await.unwrap());
    }

    #[tokio::test]
    async fn save_twice_fails() {
        let repo = InMemoryMetricSetRepository::new();
        let s = set("u1", "Urban");
        repo.save(&s).await.unwrap();

        assert!(repo.save(&s).await.is_err());
    }

    #[tokio::test]
    async fn update_missing_fails_with_not_found() {
        let repo = InMemoryMetricSetRepository::new();
        let err = repo.update(&set("u1", "Ghost")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MetricSetNotFound);
    }

    #[tokio::test]
    async fn find_by_owner_filters_and_sorts() {
        let repo = InMemoryMetricSetRepository::new();
        repo.save(&set("u1", "Suburban")).await.unwrap();
        repo.save(&set("u1", "Airport")).await.unwrap();
        repo.save(&set("u2", "Mall")).await.unwrap();

        let names: Vec<String> = repo
            .find_by_owner(&UserId::new("u1").unwrap())
            .await
            .unwrap()
            .iter()
            .map(|s| s.name().to_string())
            .collect();

        assert_eq!(names, vec!["Airport".to_string(), "Suburban".to_string()]);
    }

    #[tokio::test]
    async fn delete_removes() {
        let repo = InMemoryMetricSetRepository::new();
        let s = set("u1", "Urban");
        repo.save(&s).await.unwrap();

        repo.delete(s.id()).await.unwrap();

        assert_eq!(repo.find_by_id(s.id()).await.unwrap(), None);
        assert!(repo.delete(s.id()).await.is_err());
    }
}
