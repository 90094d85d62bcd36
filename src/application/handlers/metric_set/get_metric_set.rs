//! GetMetricSetHandler - Query handler for a single metric set.

use std::sync::Arc;

use crate::domain::assessment::{AssessmentError, MetricSet};
use crate::domain::foundation::{MetricSetId, Repository, UserId};
use crate::ports::MetricSetRepository;

/// Query to get a metric set by ID.
#[derive(Debug, Clone)]
pub struct GetMetricSetQuery {
    pub metric_set_id: MetricSetId,
    pub user_id: UserId,
}

/// Handler for retrieving metric sets.
pub struct GetMetricSetHandler {
    repository: Arc<dyn MetricSetRepository>,
}

impl GetMetricSetHandler {
    pub fn new(repository: Arc<dyn MetricSetRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetMetricSetQuery) -> Result<MetricSet, AssessmentError> {
        let set = self
            .repository
            .find_by_id(query.metric_set_id)
            .await?
            .ok_or(AssessmentError::MetricSetNotFound(query.metric_set_id))?;

        if !set.is_owned_by(&query.user_id) {
            return Err(AssessmentError::Forbidden);
        }

        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMetricSetRepository;

    async fn repo_with_set(owner: &str) -> (Arc<InMemoryMetricSetRepository>, MetricSet) {
        let repo = Arc::new(InMemoryMetricSetRepository::new());
        let owner = UserId::new(owner).unwrap();
        let set = MetricSet::new(owner, "Urban infill", None, vec![]).unwrap();
        repo.save(&set).await.unwrap();
        (repo, set)
    }

    #[tokio::test]
    async fn owner_can_read() {
        let (repo, set) = repo_with_set("owner-1").await;
        let handler = GetMetricSetHandler::new(repo);

        let found = handler
            .handle(GetMetricSetQuery {
                metric_set_id: set.id(),
                user_id: UserId::new("owner-1").unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(found.name(), "Urban infill");
    }

    #[tokio::test]
    async fn other_user_is_forbidden() {
        let (repo, set) = repo_with_set("owner-1").await;
        let handler = GetMetricSetHandler::new(repo);

        let result = handler
            .handle(GetMetricSetQuery {
                metric_set_id: set.id(),
                user_id: UserId::new("intruder").unwrap(),
            })
            .await;

        assert_eq!(result, Err(AssessmentError::Forbidden));
    }

    #[tokio::test]
    async fn missing_set_is_not_found() {
        let handler = GetMetricSetHandler::new(Arc::new(InMemoryMetricSetRepository::new()));
        let id = MetricSetId::new();

        let result = handler
            .handle(GetMetricSetQuery {
                metric_set_id: id,
                user_id: UserId::new("owner-1").unwrap(),
            })
            .await;

        assert_eq!(result, Err(AssessmentError::MetricSetNotFound(id)));
    }
}
