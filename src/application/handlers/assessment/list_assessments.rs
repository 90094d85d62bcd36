//! ListAssessmentsHandler - Query handler for a user's site assessments.

use std::sync::Arc;

use crate::domain::assessment::{AssessmentError, SiteAssessment};
use crate::domain::foundation::{MetricSetId, Repository, UserId};
use crate::ports::{AssessmentRepository, MetricSetRepository};

/// Query to list assessments, optionally narrowed to one metric set.
#[derive(Debug, Clone)]
pub struct ListAssessmentsQuery {
    pub user_id: UserId,
    pub metric_set_id: Option<MetricSetId>,
}

pub struct ListAssessmentsHandler {
    assessments: Arc<dyn AssessmentRepository>,
    metric_sets: Arc<dyn MetricSetRepository>,
}

impl ListAssessmentsHandler {
    pub fn new(
        assessments: Arc<dyn AssessmentRepository>,
        metric_sets: Arc<dyn MetricSetRepository>,
    ) -> Self {
        Self {
            assessments,
            metric_sets,
        }
    }

    /// Without a metric set: the caller's assessments, most recently updated
    /// first. With one: that set's assessments in creation order, after the
    /// set's ownership is checked.
    pub async fn handle(
        &self,
        query: ListAssessmentsQuery,
    ) -> Result<Vec<SiteAssessment>, AssessmentError> {
        let Some(metric_set_id) = query.metric_set_id else {
            return Ok(self.assessments.find_by_owner(&query.user_id).await?);
        };

        let set = self
            .metric_sets
            .find_by_id(metric_set_id)
            .await?
            .ok_or(AssessmentError::MetricSetNotFound(metric_set_id))?;
        if !set.is_owned_by(&query.user_id) {
            return Err(AssessmentError::Forbidden);
        }

        let assessments = self.assessments.find_by_metric_set(metric_set_id).await?;
        Ok(assessments
            .into_iter()
            .filter(|a| a.is_owned_by(&query.user_id))
            .collect())
    }
}
