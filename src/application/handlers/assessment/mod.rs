//! Site assessment command and query handlers.
//!
//! Every command that changes an input to the score (a metric value, a
//! site-visit grade) recalculates the assessment before it is persisted, so
//! stored scores never lag behind stored inputs.

mod clear_metric_value;
mod create_assessment;
mod get_assessment;
mod list_assessments;
mod rate_site_visit;
mod recalculate_assessment;
mod record_metric_value;

pub use clear_metric_value::{ClearMetricValueCommand, ClearMetricValueHandler};
pub use create_assessment::{CreateAssessmentCommand, CreateAssessmentHandler};
pub use get_assessment::{AssessmentView, GetAssessmentHandler, GetAssessmentQuery};
pub use list_assessments::{ListAssessmentsHandler, ListAssessmentsQuery};
pub use rate_site_visit::{RateSiteVisitCommand, RateSiteVisitHandler};
pub use recalculate_assessment::{RecalculateAssessmentCommand, RecalculateAssessmentHandler};
pub use record_metric_value::{RecordMetricValueCommand, RecordMetricValueHandler};

use crate::domain::assessment::{
    AssessmentError, AssessmentRecalculator, AssessmentScoresRecalculated, MetricSet,
    RecalculationOutcome, SiteAssessment,
};
use crate::domain::foundation::{
    AssessmentId, CommandMetadata, DomainEvent, Repository, UserId,
};
use crate::ports::{AssessmentRepository, EventPublisher, MetricSetRepository};

/// Result of any command that rescored an assessment.
#[derive(Debug, Clone)]
pub struct AssessmentUpdate {
    pub assessment: SiteAssessment,
    pub outcome: RecalculationOutcome,
}

/// Loads an assessment and its metric set, checking the caller owns the assessment.
pub(crate) async fn load_owned(
    assessments: &dyn AssessmentRepository,
    metric_sets: &dyn MetricSetRepository,
    assessment_id: AssessmentId,
    user_id: &UserId,
) -> Result<(SiteAssessment, MetricSet), AssessmentError> {
    let assessment = assessments
        .find_by_id(assessment_id)
        .await?
        .ok_or(AssessmentError::NotFound(assessment_id))?;

    if !assessment.is_owned_by(user_id) {
        return Err(AssessmentError::Forbidden);
    }

    let metric_set = metric_sets
        .find_by_id(assessment.metric_set_id())
        .await?
        .ok_or(AssessmentError::MetricSetNotFound(assessment.metric_set_id()))?;

    Ok((assessment, metric_set))
}

/// Recalculates, persists, and publishes when the headline scores moved.
pub(crate) async fn rescore_and_save(
    assessments: &dyn AssessmentRepository,
    publisher: &dyn EventPublisher,
    mut assessment: SiteAssessment,
    metric_set: &MetricSet,
    metadata: &CommandMetadata,
) -> Result<AssessmentUpdate, AssessmentError> {
    let outcome = AssessmentRecalculator::recalculate(&mut assessment, metric_set);

    assessments.update(&assessment).await?;

    if outcome.changed() {
        let envelope =
            AssessmentScoresRecalculated::from_outcome(&assessment, &outcome).to_envelope()?;
        publisher.publish(metadata.stamp(envelope)).await?;
    }

    tracing::debug!(
        assessment_id = %assessment.id(),
        overall = ?outcome.overall_signal_score.map(|s| s.value()),
        completion = outcome.completion_percentage.value(),
        changed = outcome.changed(),
        "assessment rescored"
    );

    Ok(AssessmentUpdate {
        assessment,
        outcome,
    })
}
