//! RateSiteVisitHandler - Command handler for grading a site-visit criterion.

use std::sync::Arc;

use super::{load_owned, rescore_and_save, AssessmentUpdate};
use crate::domain::assessment::{AssessmentError, SiteVisitCriterion, SiteVisitGrade};
use crate::domain::foundation::{AssessmentId, CommandMetadata};
use crate::ports::{AssessmentRepository, EventPublisher, MetricSetRepository};

/// Command to grade (or un-grade, with `grade: None`) one site-visit criterion.
#[derive(Debug, Clone)]
pub struct RateSiteVisitCommand {
    pub assessment_id: AssessmentId,
    pub criterion: SiteVisitCriterion,
    pub grade: Option<SiteVisitGrade>,
    pub notes: Option<String>,
}

/// Handler for site-visit ratings.
pub struct RateSiteVisitHandler {
    assessments: Arc<dyn AssessmentRepository>,
    metric_sets: Arc<dyn MetricSetRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl RateSiteVisitHandler {
    pub fn new(
        assessments: Arc<dyn AssessmentRepository>,
        metric_sets: Arc<dyn MetricSetRepository>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            assessments,
            metric_sets,
            publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: RateSiteVisitCommand,
        metadata: CommandMetadata,
    ) -> Result<AssessmentUpdate, AssessmentError> {
        let (mut assessment, metric_set) = load_owned(
            self.assessments.as_ref(),
            self.metric_sets.as_ref(),
            cmd.assessment_id,
            &metadata.user_id,
        )
        .await?;

        assessment.rate_site_visit(cmd.criterion, cmd.grade, cmd.notes);

        rescore_and_save(
            self.assessments.as_ref(),
            self.publisher.as_ref(),
            assessment,
            &metric_set,
            &metadata,
        )
        .await
    }
}
