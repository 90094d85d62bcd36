//! RecalculateAssessmentHandler - Command handler for an explicit rescore.
//!
//! Scores are normally refreshed as a side effect of other commands. This one
//! exists for assessments whose stored scores were written before a scoring
//! change, or imported without scores.

use std::sync::Arc;

use super::{load_owned, rescore_and_save, AssessmentUpdate};
use crate::domain::assessment::AssessmentError;
use crate::domain::foundation::{AssessmentId, CommandMetadata};
use crate::ports::{AssessmentRepository, EventPublisher, MetricSetRepository};

/// Command to recompute an assessment's scores from its current inputs.
#[derive(Debug, Clone)]
pub struct RecalculateAssessmentCommand {
    pub assessment_id: AssessmentId,
}

/// Handler for explicit recalculation.
pub struct RecalculateAssessmentHandler {
    assessments: Arc<dyn AssessmentRepository>,
    metric_sets: Arc<dyn MetricSetRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl RecalculateAssessmentHandler {
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
        cmd: RecalculateAssessmentCommand,
        metadata: CommandMetadata,
    ) -> Result<AssessmentUpdate, AssessmentError> {
        let (assessment, metric_set) = load_owned(
            self.assessments.as_ref(),
            self.metric_sets.as_ref(),
            cmd.assessment_id,
            &metadata.user_id,
        )
        .await?;

        let update = rescore_and_save(
            self.assessments.as_ref(),
            self.publisher.as_ref(),
            assessment,
            &metric_set,
            &metadata,
        )
        .await?;

        tracing::info!(
            assessment_id = %cmd.assessment_id,
            changed = update.outcome.changed(),
            "assessment recalculated"
        );

        Ok(update)
    }
}
