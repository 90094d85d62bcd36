//! Metric set command and query handlers.
//!
//! Edits that change how a set scores (targets, directions, the metric list)
//! rescore every assessment built on the set. The set and those assessments
//! are persisted together: if the assessment batch fails, the set is put back.

mod add_metric;
mod create_metric_set;
mod get_metric_set;
mod list_metric_sets;
mod remove_metric;
mod update_metric_targets;

pub use add_metric::{AddMetricCommand, AddMetricHandler};
pub use create_metric_set::{CreateMetricSetCommand, CreateMetricSetHandler};
pub use get_metric_set::{GetMetricSetHandler, GetMetricSetQuery};
pub use list_metric_sets::{ListMetricSetsHandler, ListMetricSetsQuery};
pub use remove_metric::{RemoveMetricCommand, RemoveMetricHandler};
pub use update_metric_targets::{
    TargetChange, TargetEdit, UpdateMetricTargetsCommand, UpdateMetricTargetsHandler,
    UpdateMetricTargetsResult,
};

use crate::domain::assessment::{
    AssessmentError, AssessmentRecalculator, AssessmentScoresRecalculated, MetricSet,
};
use crate::domain::foundation::{
    CommandMetadata, DomainEvent, EventEnvelope, MetricSetId, Repository, UserId,
};
use crate::ports::{AssessmentRepository, MetricSetRepository};

/// Result of adding or removing a metric.
#[derive(Debug, Clone)]
pub struct MetricSetRescored {
    pub metric_set: MetricSet,
    /// Assessments whose headline scores moved.
    pub rescored_assessments: usize,
}

/// Assessments rescored by a metric set edit.
pub(crate) struct Rescored {
    /// One `scores_recalculated` envelope per assessment whose headline scores moved.
    pub envelopes: Vec<EventEnvelope>,
    pub count: usize,
}

/// Loads a metric set, checking the caller owns it.
pub(crate) async fn load_owned_set(
    metric_sets: &dyn MetricSetRepository,
    metric_set_id: MetricSetId,
    user_id: &UserId,
) -> Result<MetricSet, AssessmentError> {
    let set = metric_sets
        .find_by_id(metric_set_id)
        .await?
        .ok_or(AssessmentError::MetricSetNotFound(metric_set_id))?;

    if !set.is_owned_by(user_id) {
        return Err(AssessmentError::Forbidden);
    }
    Ok(set)
}

/// Rescores every assessment of `set`, then stores the set and the rescored
/// assessments. On a failed assessment batch `original` is written back so the
/// stored set keeps matching the stored scores.
pub(crate) async fn persist_with_rescored(
    metric_sets: &dyn MetricSetRepository,
    assessments: &dyn AssessmentRepository,
    original: &MetricSet,
    set: &MetricSet,
    metadata: &CommandMetadata,
) -> Result<Rescored, AssessmentError> {
    let mut rescored = assessments.find_by_metric_set(set.id()).await?;
    let mut envelopes = Vec::new();
    for assessment in &mut rescored {
        let outcome = AssessmentRecalculator::recalculate(assessment, set);
        if outcome.changed() {
            envelopes.push(metadata.stamp(
                AssessmentScoresRecalculated::from_outcome(assessment, &outcome).to_envelope()?,
            ));
        }
    }

    metric_sets.update(set).await?;

    if let Err(err) = assessments.update_many(&rescored).await {
        tracing::warn!(
            metric_set_id = %set.id(),
            assessments = rescored.len(),
            error = %err,
            "rescored assessments not saved, restoring metric set"
        );
        if let Err(restore_err) = metric_sets.update(original).await {
            tracing::error!(
                metric_set_id = %set.id(),
                error = %restore_err,
                "failed to restore metric set"
            );
        }
        return Err(err.into());
    }

    Ok(Rescored {
        count: envelopes.len(),
        envelopes,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;

    use crate::adapters::memory::InMemoryAssessmentRepository;
    use crate::domain::assessment::SiteAssessment;
    use crate::domain::foundation::{
        AssessmentId, DomainError, ErrorCode, MetricSetId, Repository, UserId,
    };
    use crate::ports::AssessmentRepository;

    /// Assessment store whose batch update always fails.
    #[derive(Default)]
    pub struct FailingBatchAssessments {
        pub inner: InMemoryAssessmentRepository,
    }

    #[async_trait]
    impl Repository<SiteAssessment, AssessmentId> for FailingBatchAssessments {
        async fn find_by_id(
            &self,
            id: AssessmentId,
        ) -> Result<Option<SiteAssessment>, DomainError> {
            self.inner.find_by_id(id).await
        }

        async fn save(&self, assessment: &SiteAssessment) -> Result<(), DomainError> {
            self.inner.save(assessment).await
        }

        async fn update(&self, assessment: &SiteAssessment) -> Result<(), DomainError> {
            self.inner.update(assessment).await
        }

        async fn delete(&self, id: AssessmentId) -> Result<(), DomainError> {
            self.inner.delete(id).await
        }
    }

    #[async_trait]
    impl AssessmentRepository for FailingBatchAssessments {
        async fn find_by_metric_set(
            &self,
            metric_set_id: MetricSetId,
        ) -> Result<Vec<SiteAssessment>, DomainError> {
            self.inner.find_by_metric_set(metric_set_id).await
        }

        async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<SiteAssessment>, DomainError> {
            self.inner.find_by_owner(owner).await
        }

        async fn update_many(&self, _assessments: &[SiteAssessment]) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "connection reset"))
        }
    }
}
