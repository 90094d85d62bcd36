//! GetAssessmentHandler - Query handler for an assessment with its breakdown.

use serde::Serialize;
use std::sync::Arc;

use super::load_owned;
use crate::domain::assessment::{
    AssessmentError, AssessmentRecalculator, MetricBreakdown, SiteAssessment,
};
use crate::domain::foundation::{AssessmentId, UserId};
use crate::ports::{AssessmentRepository, MetricSetRepository};

/// Query to get an assessment by ID.
#[derive(Debug, Clone)]
pub struct GetAssessmentQuery {
    pub assessment_id: AssessmentId,
    pub user_id: UserId,
}

/// Read model: the assessment plus one breakdown row per metric in its set.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentView {
    pub assessment: SiteAssessment,
    pub metric_set_name: String,
    pub breakdown: Vec<MetricBreakdown>,
}

/// Handler for retrieving assessments.
pub struct GetAssessmentHandler {
    assessments: Arc<dyn AssessmentRepository>,
    metric_sets: Arc<dyn MetricSetRepository>,
}

impl GetAssessmentHandler {
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
        query: GetAssessmentQuery,
    ) -> Result<AssessmentView, AssessmentError> {
        let (assessment, metric_set) = load_owned(
            self.assessments.as_ref(),
            self.metric_sets.as_ref(),
            query.assessment_id,
            &query.user_id,
        )
        .await?;

        let breakdown = AssessmentRecalculator::breakdown(&assessment, &metric_set);

        Ok(AssessmentView {
            assessment,
            metric_set_name: metric_set.name().to_string(),
            breakdown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{key, Stores};
    use super::super::{RecordMetricValueCommand, RecordMetricValueHandler};
    use super::*;
    use crate::domain::foundation::CommandMetadata;
    use crate::domain::scoring::SignalScore;

    #[tokio::test]
    async fn view_includes_every_metric_in_set_order() {
        let stores = Stores::new();
        let (_, assessment) = stores.seed().await;

        RecordMetricValueHandler::new(
            stores.assessments.clone(),
            stores.sets.clone(),
            stores.bus.clone(),
        )
        .handle(
            RecordMetricValueCommand {
                assessment_id: assessment.id(),
                key: key("competitors"),
                entered_value: Some(1.0),
                notes: Some("one big-box store".to_string()),
            },
            CommandMetadata::test_fixture(),
        )
        .await
        .unwrap();

        let view = GetAssessmentHandler::new(stores.assessments.clone(), stores.sets.clone())
            .handle(GetAssessmentQuery {
                assessment_id: assessment.id(),
                user_id: CommandMetadata::test_fixture().user_id,
            })
            .await
            .unwrap();

        assert_eq!(view.metric_set_name, "Neighborhood grocer");
        let keys: Vec<_> = view.breakdown.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["households", "competitors"]);
        assert_eq!(view.breakdown[0].signal_score, None);
        assert_eq!(view.breakdown[1].signal_score, SignalScore::clamped(100.0));
    }

    #[tokio::test]
    async fn other_user_cannot_read() {
        let stores = Stores::new();
        let (_, assessment) = stores.seed().await;

        let result = GetAssessmentHandler::new(stores.assessments.clone(), stores.sets.clone())
            .handle(GetAssessmentQuery {
                assessment_id: assessment.id(),
                user_id: UserId::new("eve").unwrap(),
            })
            .await;

        assert_eq!(result.unwrap_err(), AssessmentError::Forbidden);
    }
}
