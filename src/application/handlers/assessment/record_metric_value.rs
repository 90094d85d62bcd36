//! RecordMetricValueHandler - Command handler for entering a measured value.

use std::sync::Arc;

use super::{load_owned, rescore_and_save, AssessmentUpdate};
use crate::domain::assessment::{AssessmentError, MetricKey};
use crate::domain::foundation::{AssessmentId, CommandMetadata};
use crate::ports::{AssessmentRepository, EventPublisher, MetricSetRepository};

/// Command to record (or clear, with `entered_value: None`) one metric value.
#[derive(Debug, Clone)]
pub struct RecordMetricValueCommand {
    pub assessment_id: AssessmentId,
    pub key: MetricKey,
    pub entered_value: Option<f64>,
    pub notes: Option<String>,
}

/// Handler for recording metric values.
pub struct RecordMetricValueHandler {
    assessments: Arc<dyn AssessmentRepository>,
    metric_sets: Arc<dyn MetricSetRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl RecordMetricValueHandler {
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
        cmd: RecordMetricValueCommand,
        metadata: CommandMetadata,
    ) -> Result<AssessmentUpdate, AssessmentError> {
        let (mut assessment, metric_set) = load_owned(
            self.assessments.as_ref(),
            self.metric_sets.as_ref(),
            cmd.assessment_id,
            &metadata.user_id,
        )
        .await?;

        if !metric_set.contains(&cmd.key) {
            return Err(AssessmentError::unknown_metric(cmd.key.as_str()));
        }

        assessment.record_metric_value(cmd.key, cmd.entered_value, cmd.notes)?;

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

#[cfg(test)]
mod tests {
    use super::super::test_support::{key, Stores};
    use super::*;
    use crate::domain::foundation::{Repository, UserId};
    use crate::domain::scoring::SignalScore;

    fn handler(stores: &Stores) -> RecordMetricValueHandler {
        RecordMetricValueHandler::new(
            stores.assessments.clone(),
            stores.sets.clone(),
            stores.bus.clone(),
        )
    }

    fn record(id: AssessmentId, metric: &str, value: Option<f64>) -> RecordMetricValueCommand {
        RecordMetricValueCommand {
            assessment_id: id,
            key: key(metric),
            entered_value: value,
            notes: None,
        }
    }

    #[tokio::test]
    async fn recording_a_value_rescores_and_persists() {
        let stores = Stores::new();
        let (_, assessment) = stores.seed().await;

        let update = handler(&stores)
            .handle(
                record(assessment.id(), "households", Some(6_000.0)),
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        // 6000 / 8000 = 75; 1 of 12 items complete
        assert_eq!(update.outcome.overall_signal_score, SignalScore::clamped(75.0));
        assert_eq!(update.outcome.completion_percentage.value(), 8);

        let stored = stores
            .assessments
            .find_by_id(assessment.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.overall_signal_score(), SignalScore::clamped(75.0));
        assert!(stores.bus.has_event("assessment.scores_recalculated.v1"));
    }

    #[tokio::test]
    async fn lower_is_better_metric_inverts_ratio() {
        let stores = Stores::new();
        let (_, assessment) = stores.seed().await;
        let h = handler(&stores);

        let update = h
            .handle(
                record(assessment.id(), "competitors", Some(4.0)),
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(update.outcome.overall_signal_score, SignalScore::clamped(50.0));
    }

    #[tokio::test]
    async fn re_recording_same_value_publishes_once() {
        let stores = Stores::new();
        let (_, assessment) = stores.seed().await;
        let h = handler(&stores);

        for _ in 0..2 {
            h.handle(
                record(assessment.id(), "households", Some(8_000.0)),
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();
        }

        assert_eq!(stores.bus.events_of_type("assessment.scores_recalculated.v1").len(), 1);
    }

    #[tokio::test]
    async fn key_outside_metric_set_is_rejected() {
        let stores = Stores::new();
        let (_, assessment) = stores.seed().await;

        let result = handler(&stores)
            .handle(
                record(assessment.id(), "walk_score", Some(90.0)),
                CommandMetadata::test_fixture(),
            )
            .await;

        assert_eq!(result.unwrap_err(), AssessmentError::unknown_metric("walk_score"));
        assert_eq!(stores.bus.event_count(), 0);
    }

    #[tokio::test]
    async fn non_finite_value_is_rejected() {
        let stores = Stores::new();
        let (_, assessment) = stores.seed().await;

        let result = handler(&stores)
            .handle(
                record(assessment.id(), "households", Some(f64::INFINITY)),
                CommandMetadata::test_fixture(),
            )
            .await;

        assert!(matches!(result, Err(AssessmentError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn other_users_assessment_is_forbidden() {
        let stores = Stores::new();
        let (_, assessment) = stores.seed().await;

        let result = handler(&stores)
            .handle(
                record(assessment.id(), "households", Some(1.0)),
                CommandMetadata::new(UserId::new("mallory").unwrap()),
            )
            .await;

        assert_eq!(result.unwrap_err(), AssessmentError::Forbidden);
    }

    #[tokio::test]
    async fn missing_assessment_is_not_found() {
        let stores = Stores::new();
        stores.seed().await;
        let id = AssessmentId::new();

        let result = handler(&stores)
            .handle(record(id, "households", Some(1.0)), CommandMetadata::test_fixture())
            .await;

        assert_eq!(result.unwrap_err(), AssessmentError::NotFound(id));
    }
}
