//! ClearMetricValueHandler - Command handler for removing an entered value.

use std::sync::Arc;

use super::{load_owned, rescore_and_save, AssessmentUpdate};
use crate::domain::assessment::{AssessmentError, MetricKey};
use crate::domain::foundation::{AssessmentId, CommandMetadata};
use crate::ports::{AssessmentRepository, EventPublisher, MetricSetRepository};

/// Command to drop a metric's value row, notes included. Works for keys no
/// longer in the metric set too.
#[derive(Debug, Clone)]
pub struct ClearMetricValueCommand {
    pub assessment_id: AssessmentId,
    pub key: MetricKey,
}

pub struct ClearMetricValueHandler {
    assessments: Arc<dyn AssessmentRepository>,
    metric_sets: Arc<dyn MetricSetRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl ClearMetricValueHandler {
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
        cmd: ClearMetricValueCommand,
        metadata: CommandMetadata,
    ) -> Result<AssessmentUpdate, AssessmentError> {
        let (mut assessment, metric_set) = load_owned(
            self.assessments.as_ref(),
            self.metric_sets.as_ref(),
            cmd.assessment_id,
            &metadata.user_id,
        )
        .await?;

        if !assessment.clear_metric_value(&cmd.key) {
            return Err(AssessmentError::unknown_metric(cmd.key.as_str()));
        }

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
