use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::assessment::SiteAssessment;
use crate::domain::foundation::{
    AssessmentId, DomainError, ErrorCode, MetricSetId, Repository, UserId,
};
use crate::ports::AssessmentRepository;

/// In-memory implementation of AssessmentRepository.
#[derive(Default)]
pub struct InMemoryAssessmentRepository {
    assessments: RwLock<HashMap<AssessmentId, SiteAssessment>>,
}

impl InMemoryAssessmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<SiteAssessment, AssessmentId> for InMemoryAssessmentRepository {
    async fn find_by_id(&self, id: AssessmentId) -> Result<Option<SiteAssessment>, DomainError> {
        Ok(self.assessments.read().await.get(&id).cloned())
    }

    async fn save(&self, assessment: &SiteAssessment) -> Result<(), DomainError> {
        let mut assessments = self.assessments.write().await;
        if assessments.contains_key(&assessment.id()) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Assessment already exists: {}", assessment.id()),
            ));
        }
        assessments.insert(assessment.id(), assessment.clone());
        Ok(())
    }

    async fn update(&self, assessment: &SiteAssessment) -> Result<(), DomainError> {
        match self.assessments.write().await.get_mut(&assessment.id()) {
            Some(existing) => {
                *existing = assessment.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::AssessmentNotFound,
                format!("Assessment not found: {}", assessment.id()),
            )),
        }
    }

    async fn delete(&self, id: AssessmentId) -> Result<(), DomainError> {
        self.assessments
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::AssessmentNotFound,
                    format!("Assessment not found: {}", id),
                )
            })
    }
}

#[async_trait]
impl AssessmentRepository for InMemoryAssessmentRepository {
    async fn find_by_metric_set(
        &self,
        metric_set_id: MetricSetId,
    ) -> Result<Vec<SiteAssessment>, DomainError> {
        let mut found: Vec<SiteAssessment> = self
            .assessments
            .read()
            .await
            .values()
            .filter(|a| a.metric_set_id() == metric_set_id)
            .cloned()
            .collect();
        found.sort_by_key(|a| a.created_at());
        Ok(found)
    }

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<SiteAssessment>, DomainError> {
        let mut found: Vec<SiteAssessment> = self
            .assessments
            .read()
            .await
            .values()
            .filter(|a| a.is_owned_by(owner))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
        Ok(found)
    }

    async fn update_many(&self, updates: &[SiteAssessment]) -> Result<(), DomainError> {
        let mut assessments = self.assessments.write().await;
        if let Some(missing) = updates.iter().find(|a| !assessments.contains_key(&a.id())) {
            return Err(DomainError::new(
                ErrorCode::AssessmentNotFound,
                format!("Assessment not found: {}", missing.id()),
            ));
        }
        for assessment in updates {
            assessments.insert(assessment.id(), assessment.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::MetricKey;

    fn traffic() -> MetricKey {
        MetricKey::new("traffic_count").unwrap()
    }

    fn assessment(owner: &str, set: MetricSetId, name: &str) -> SiteAssessment {
        SiteAssessment::new(UserId::new(owner).unwrap(), set, name, None).unwrap()
    }

    #[tokio::test]
    async fn find_by_metric_set_only_returns_matches() {
        let repo = InMemoryAssessmentRepository::new();
        let set_a = MetricSetId::new();
        let set_b = MetricSetId::new();
        repo.save(&assessment("u1", set_a, "Site 1")).await.unwrap();
        repo.save(&assessment("u1", set_a, "Site 2")).await.unwrap();
        repo.save(&assessment("u1", set_b, "Site 3")).await.unwrap();

        assert_eq!(repo.find_by_metric_set(set_a).await.unwrap().len(), 2);
        assert_eq!(repo.find_by_metric_set(set_b).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_replaces_stored_copy() {
        let repo = InMemoryAssessmentRepository::new();
        let mut a = assessment("u1", MetricSetId::new(), "Corner lot");
        repo.save(&a).await.unwrap();

        a.record_metric_value(traffic(), Some(12_000.0), None).unwrap();
        repo.update(&a).await.unwrap();

        let stored = repo.find_by_id(a.id()).await.unwrap().unwrap();
        assert_eq!(stored.metric_values().len(), 1);
    }

    #[tokio::test]
    async fn update_missing_fails_with_not_found() {
        let repo = InMemoryAssessmentRepository::new();
        let err = repo
            .update(&assessment("u1", MetricSetId::new(), "Ghost"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AssessmentNotFound);
    }

    #[tokio::test]
    async fn find_by_owner_filters() {
        let repo = InMemoryAssessmentRepository::new();
        let set = MetricSetId::new();
        repo.save(&assessment("u1", set, "Mine")).await.unwrap();
        repo.save(&assessment("u2", set, "Theirs")).await.unwrap();

        let mine = repo.find_by_owner(&UserId::new("u1").unwrap()).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].site_name(), "Mine");
    }

    #[tokio::test]
    async fn update_many_is_all_or_nothing() {
        let repo = InMemoryAssessmentRepository::new();
        let set = MetricSetId::new();
        let mut stored = assessment("u1", set, "Stored");
        repo.save(&stored).await.unwrap();
        let unsaved = assessment("u1", set, "Never saved");

        stored.record_metric_value(traffic(), Some(9_500.0), None).unwrap();
        let result = repo.update_many(&[stored.clone(), unsaved]).await;

        assert!(result.is_err());
        let found = repo.find_by_id(stored.id()).await.unwrap().unwrap();
        assert!(found.metric_values().is_empty());

        repo.update_many(&[stored.clone()]).await.unwrap();
        let found = repo.find_by_id(stored.id()).await.unwrap().unwrap();
        assert_eq!(found.metric_values().len(), 1);
    }
}
