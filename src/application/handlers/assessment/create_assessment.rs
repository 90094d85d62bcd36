//! CreateAssessmentHandler - Command handler for starting a site assessment.

use std::sync::Arc;

use crate::domain::assessment::{AssessmentError, AssessmentRecalculator, SiteAssessment};
use crate::domain::foundation::{CommandMetadata, MetricSetId, Repository};
use crate::ports::{AssessmentRepository, MetricSetRepository};

/// Command to create a new assessment against one of the caller's metric sets.
#[derive(Debug, Clone)]
pub struct CreateAssessmentCommand {
    pub metric_set_id: MetricSetId,
    pub site_name: String,
    pub address: Option<String>,
}

/// Handler for creating assessments.
pub struct CreateAssessmentHandler {
    assessments: Arc<dyn AssessmentRepository>,
    metric_sets: Arc<dyn MetricSetRepository>,
}

impl CreateAssessmentHandler {
    pub fn new(
        assessments: Arc<dyn AssessmentRepository>,
        metric_sets: Arc<dyn MetricSetRepository>,
    ) -> Self {
        Self {
            assessments,
            metric_sets,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateAssessmentCommand,
        metadata: CommandMetadata,
    ) -> Result<SiteAssessment, AssessmentError> {
        let metric_set = self
            .metric_sets
            .find_by_id(cmd.metric_set_id)
            .await?
            .ok_or(AssessmentError::MetricSetNotFound(cmd.metric_set_id))?;

        if !metric_set.is_owned_by(&metadata.user_id) {
            return Err(AssessmentError::Forbidden);
        }

        let mut assessment =
            SiteAssessment::new(metadata.user_id, metric_set.id(), cmd.site_name, cmd.address)?;
        AssessmentRecalculator::recalculate(&mut assessment, &metric_set);

        self.assessments.save(&assessment).await?;

        tracing::info!(
            assessment_id = %assessment.id(),
            metric_set_id = %metric_set.id(),
            "assessment created"
        );

        Ok(assessment)
    }
}
