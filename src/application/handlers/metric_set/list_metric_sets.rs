//! ListMetricSetsHandler - Query handler for a user's metric sets.

use std::sync::Arc;

use crate::domain::assessment::{AssessmentError, MetricSet};
use crate::domain::foundation::UserId;
use crate::ports::MetricSetRepository;

/// Query to list the caller's metric sets, ordered by name.
#[derive(Debug, Clone)]
pub struct ListMetricSetsQuery {
    pub user_id: UserId,
}

pub struct ListMetricSetsHandler {
    repository: Arc<dyn MetricSetRepository>,
}

impl ListMetricSetsHandler {
    pub fn new(repository: Arc<dyn MetricSetRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListMetricSetsQuery,
    ) -> Result<Vec<MetricSet>, AssessmentError> {
        Ok(self.repository.find_by_owner(&query.user_id).await?)
    }
}
