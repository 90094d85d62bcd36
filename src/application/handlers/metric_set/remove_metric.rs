//! RemoveMetricHandler - Command handler for dropping a metric from a set.
//!
//! Values already entered for the metric stay on each assessment but no
//! longer count toward its scores or completion.

use std::sync::Arc;

use super::{load_owned_set, persist_with_rescored, MetricSetRescored};
use crate::domain::assessment::{AssessmentError, MetricKey, MetricSetMetricsChanged};
use crate::domain::foundation::{CommandMetadata, DomainEvent, MetricSetId};
use crate::ports::{AssessmentRepository, EventPublisher, MetricSetRepository};

#[derive(Debug, Clone)]
pub struct RemoveMetricCommand {
    pub metric_set_id: MetricSetId,
    pub key: MetricKey,
}

pub struct RemoveMetricHandler {
    metric_sets: Arc<dyn MetricSetRepository>,
    assessments: Arc<dyn AssessmentRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl RemoveMetricHandler {
    pub fn new(
        metric_sets: Arc<dyn MetricSetRepository>,
        assessments: Arc<dyn AssessmentRepository>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            metric_sets,
            assessments,
            publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: RemoveMetricCommand,
        metadata: CommandMetadata,
    ) -> Result<MetricSetRescored, AssessmentError> {
        let original =
            load_owned_set(self.metric_sets.as_ref(), cmd.metric_set_id, &metadata.user_id).await?;
        let mut set = original.clone();
        set.remove_metric(&cmd.key)?;

        let rescored = persist_with_rescored(
            self.metric_sets.as_ref(),
            self.assessments.as_ref(),
            &original,
            &set,
            &metadata,
        )
        .await?;

        let mut envelopes = vec![metadata
            .stamp(MetricSetMetricsChanged::removed(set.id(), cmd.key.clone()).to_envelope()?)];
        envelopes.extend(rescored.envelopes);
        self.publisher.publish_all(envelopes).await?;

        tracing::info!(
            metric_set_id = %set.id(),
            key = %cmd.key,
            rescored = rescored.count,
            "metric removed"
        );

        Ok(MetricSetRescored {
            metric_set: set,
            rescored_assessments: rescored.count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::FailingBatchAssessments;
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{InMemoryAssessmentRepository, InMemoryMetricSetRepository};
    use crate::domain::assessment::{
        AssessmentRecalculator, MetricCategory, MetricDefinition, MetricSet, SiteAssessment,
    };
    use crate::domain::foundation::Repository;
    use crate::domain::scoring::SignalScore;

    fn key(s: &str) -> MetricKey {
        MetricKey::new(s).unwrap()
    }

    fn two_metric_set() -> MetricSet {
        MetricSet::new(
            CommandMetadata::test_fixture().user_id,
            "Coffee kiosk",
            None,
            vec![
                MetricDefinition::new(
                    key("foot_traffic"),
                    "Foot traffic",
                    MetricCategory::Traffic,
                    true,
                )
                .with_target(1_000.0),
                MetricDefinition::new(key("rent"), "Rent", MetricCategory::Other, false)
                    .with_target(20.0),
            ],
        )
        .unwrap()
    }

    fn scored_assessment(set: &MetricSet) -> SiteAssessment {
        let mut assessment =
            SiteAssessment::new(set.owner().clone(), set.id(), "Transit hub", None).unwrap();
        assessment
            .record_metric_value(key("foot_traffic"), Some(500.0), None)
            .unwrap();
        assessment.record_metric_value(key("rent"), Some(80.0), None).unwrap();
        AssessmentRecalculator::recalculate(&mut assessment, set);
        assessment
    }

    #[tokio::test]
    async fn removed_metric_stops_counting() {
        let sets = Arc::new(InMemoryMetricSetRepository::new());
        let assessments = Arc::new(InMemoryAssessmentRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let set = two_metric_set();
        sets.save(&set).await.unwrap();
        let assessment = scored_assessment(&set);
        // (50 + 25) / 2
        assert_eq!(assessment.overall_signal_score(), SignalScore::clamped(38.0));
        assessments.save(&assessment).await.unwrap();

        let handler = RemoveMetricHandler::new(sets.clone(), assessments.clone(), bus.clone());
        let result = handler
            .handle(
                RemoveMetricCommand {
                    metric_set_id: set.id(),
                    key: key("rent"),
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(result.rescored_assessments, 1);
        let stored = assessments.find_by_id(assessment.id()).await.unwrap().unwrap();
        assert_eq!(stored.overall_signal_score(), SignalScore::clamped(50.0));
        assert_eq!(stored.metric_values().len(), 2);
        assert!(bus.has_event("metric_set.metrics_changed.v1"));
    }

    #[tokio::test]
    async fn unknown_key_is_rejected() {
        let sets = Arc::new(InMemoryMetricSetRepository::new());
        let set = two_metric_set();
        sets.save(&set).await.unwrap();

        let handler = RemoveMetricHandler::new(
            sets,
            Arc::new(InMemoryAssessmentRepository::new()),
            Arc::new(InMemoryEventBus::new()),
        );
        let result = handler
            .handle(
                RemoveMetricCommand {
                    metric_set_id: set.id(),
                    key: key("parking"),
                },
                CommandMetadata::test_fixture(),
            )
            .await;

        assert_eq!(result.unwrap_err(), AssessmentError::unknown_metric("parking"));
    }

    #[tokio::test]
    async fn failed_batch_keeps_the_metric() {
        let sets = Arc::new(InMemoryMetricSetRepository::new());
        let assessments = Arc::new(FailingBatchAssessments::default());
        let bus = Arc::new(InMemoryEventBus::new());
        let set = two_metric_set();
        sets.save(&set).await.unwrap();
        assessments.save(&scored_assessment(&set)).await.unwrap();

        let handler = RemoveMetricHandler::new(sets.clone(), assessments, bus.clone());
        let result = handler
            .handle(
                RemoveMetricCommand {
                    metric_set_id: set.id(),
                    key: key("rent"),
                },
                CommandMetadata::test_fixture(),
            )
            .await;

        assert!(result.is_err());
        let stored = sets.find_by_id(set.id()).await.unwrap().unwrap();
        assert!(stored.contains(&key("rent")));
        assert_eq!(bus.event_count(), 0);
    }
}
