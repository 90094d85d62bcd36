//! UpdateMetricTargetsHandler - Command handler for editing metric targets.
//!
//! A target or direction change invalidates every signal score derived from
//! the set, so all assessments using it are recalculated and persisted in the
//! same command.

use std::sync::Arc;

use super::{load_owned_set, persist_with_rescored};
use crate::domain::assessment::{AssessmentError, MetricKey, MetricSet, MetricTargetsUpdated};
use crate::domain::foundation::{CommandMetadata, DomainEvent, MetricSetId};
use crate::ports::{AssessmentRepository, EventPublisher, MetricSetRepository};

/// What to do with a metric's target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TargetEdit {
    #[default]
    Keep,
    Clear,
    Set(f64),
}

impl From<Option<f64>> for TargetEdit {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(target) => TargetEdit::Set(target),
            None => TargetEdit::Clear,
        }
    }
}

/// A single change to one metric definition. `higher_is_better: None` keeps
/// the current direction.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetChange {
    pub key: MetricKey,
    pub target: TargetEdit,
    pub higher_is_better: Option<bool>,
}

/// Command to change targets on a metric set.
#[derive(Debug, Clone)]
pub struct UpdateMetricTargetsCommand {
    pub metric_set_id: MetricSetId,
    pub changes: Vec<TargetChange>,
}

/// Result of a target update.
#[derive(Debug, Clone)]
pub struct UpdateMetricTargetsResult {
    pub metric_set: MetricSet,
    pub changed_keys: Vec<MetricKey>,
    /// Assessments whose headline scores moved.
    pub rescored_assessments: usize,
}

/// Handler for updating metric targets.
pub struct UpdateMetricTargetsHandler {
    metric_sets: Arc<dyn MetricSetRepository>,
    assessments: Arc<dyn AssessmentRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl UpdateMetricTargetsHandler {
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
        cmd: UpdateMetricTargetsCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateMetricTargetsResult, AssessmentError> {
        // 1. Load and authorize
        let original =
            load_owned_set(self.metric_sets.as_ref(), cmd.metric_set_id, &metadata.user_id).await?;
        let mut set = original.clone();

        // 2. Apply every change before touching storage
        let mut changed_keys: Vec<MetricKey> = Vec::new();
        for change in &cmd.changes {
            if !set.contains(&change.key) {
                return Err(AssessmentError::unknown_metric(change.key.as_str()));
            }
            let mut changed = match change.target {
                TargetEdit::Keep => false,
                TargetEdit::Clear => set.update_target(&change.key, None)?,
                TargetEdit::Set(target) => set.update_target(&change.key, Some(target))?,
            };
            if let Some(higher_is_better) = change.higher_is_better {
                changed |= set.set_direction(&change.key, higher_is_better)?;
            }
            if changed && !changed_keys.contains(&change.key) {
                changed_keys.push(change.key.clone());
            }
        }

        if changed_keys.is_empty() {
            tracing::debug!(metric_set_id = %set.id(), "metric targets unchanged");
            return Ok(UpdateMetricTargetsResult {
                metric_set: set,
                changed_keys,
                rescored_assessments: 0,
            });
        }

        // 3. Persist the set together with its rescored assessments
        let rescored = persist_with_rescored(
            self.metric_sets.as_ref(),
            self.assessments.as_ref(),
            &original,
            &set,
            &metadata,
        )
        .await?;

        // 4. Publish
        let mut envelopes = vec![metadata.stamp(
            MetricTargetsUpdated::new(set.id(), changed_keys.clone()).to_envelope()?,
        )];
        envelopes.extend(rescored.envelopes);
        self.publisher.publish_all(envelopes).await?;

        tracing::info!(
            metric_set_id = %set.id(),
            changed = changed_keys.len(),
            rescored = rescored.count,
            "metric targets updated"
        );

        Ok(UpdateMetricTargetsResult {
            metric_set: set,
            changed_keys,
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
        AssessmentRecalculator, MetricCategory, MetricDefinition, SiteAssessment,
    };
    use crate::domain::foundation::{Repository, UserId};

    struct Fixture {
        sets: Arc<InMemoryMetricSetRepository>,
        assessments: Arc<InMemoryAssessmentRepository>,
        bus: Arc<InMemoryEventBus>,
        handler: UpdateMetricTargetsHandler,
    }

    fn fixture() -> Fixture {
        let sets = Arc::new(InMemoryMetricSetRepository::new());
        let assessments = Arc::new(InMemoryAssessmentRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let handler =
            UpdateMetricTargetsHandler::new(sets.clone(), assessments.clone(), bus.clone());
        Fixture {
            sets,
            assessments,
            bus,
            handler,
        }
    }

    fn key(s: &str) -> MetricKey {
        MetricKey::new(s).unwrap()
    }

    async fn seed(f: &Fixture) -> (MetricSet, SiteAssessment) {
        let owner = CommandMetadata::test_fixture().user_id;
        let set = MetricSet::new(
            owner.clone(),
            "Quick service",
            None,
            vec![
                MetricDefinition::new(
                    key("traffic_count"),
                    "Traffic",
                    MetricCategory::Traffic,
                    true,
                )
                .with_target(20_000.0),
            ],
        )
        .unwrap();
        f.sets.save(&set).await.unwrap();

        let mut assessment = SiteAssessment::new(owner, set.id(), "Main & 5th", None).unwrap();
        assessment
            .record_metric_value(key("traffic_count"), Some(20_000.0), None)
            .unwrap();
        AssessmentRecalculator::recalculate(&mut assessment, &set);
        f.assessments.save(&assessment).await.unwrap();

        (set, assessment)
    }

    #[tokio::test]
    async fn raising_target_rescores_assessments_and_publishes() {
        let f = fixture();
        let (set, assessment) = seed(&f).await;

        let result = f
            .handler
            .handle(
                UpdateMetricTargetsCommand {
                    metric_set_id: set.id(),
                    changes: vec![TargetChange {
                        key: key("traffic_count"),
                        target: TargetEdit::Set(40_000.0),
                        higher_is_better: None,
                    }],
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(result.changed_keys, vec![key("traffic_count")]);
        assert_eq!(result.rescored_assessments, 1);

        let stored = f.assessments.find_by_id(assessment.id()).await.unwrap().unwrap();
        assert!(stored.overall_signal_score() < assessment.overall_signal_score());

        assert!(f.bus.has_event("metric_set.targets_updated.v1"));
        assert!(f.bus.has_event("assessment.scores_recalculated.v1"));
    }

    #[tokio::test]
    async fn unchanged_targets_do_nothing() {
        let f = fixture();
        let (set, _) = seed(&f).await;

        let result = f
            .handler
            .handle(
                UpdateMetricTargetsCommand {
                    metric_set_id: set.id(),
                    changes: vec![TargetChange {
                        key: key("traffic_count"),
                        target: TargetEdit::Set(20_000.0),
                        higher_is_better: Some(true),
                    }],
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert!(result.changed_keys.is_empty());
        assert_eq!(f.bus.event_count(), 0);
    }

    #[tokio::test]
    async fn direction_only_change_keeps_target() {
        let f = fixture();
        let (set, _) = seed(&f).await;

        let result = f
            .handler
            .handle(
                UpdateMetricTargetsCommand {
                    metric_set_id: set.id(),
                    changes: vec![TargetChange {
                        key: key("traffic_count"),
                        target: TargetEdit::Keep,
                        higher_is_better: Some(false),
                    }],
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(result.changed_keys, vec![key("traffic_count")]);
        let stored = f.sets.find_by_id(set.id()).await.unwrap().unwrap();
        let definition = stored.definition(&key("traffic_count")).unwrap();
        assert_eq!(definition.target_value, Some(20_000.0));
        assert!(!definition.higher_is_better);
    }

    #[tokio::test]
    async fn keep_with_unknown_key_is_rejected() {
        let f = fixture();
        let (set, _) = seed(&f).await;

        let result = f
            .handler
            .handle(
                UpdateMetricTargetsCommand {
                    metric_set_id: set.id(),
                    changes: vec![TargetChange {
                        key: key("median_income"),
                        target: TargetEdit::Keep,
                        higher_is_better: None,
                    }],
                },
                CommandMetadata::test_fixture(),
            )
            .await;

        assert!(matches!(result, Err(AssessmentError::UnknownMetric(_))));
    }

    #[tokio::test]
    async fn unknown_key_rejects_whole_command() {
        let f = fixture();
        let (set, _) = seed(&f).await;

        let result = f
            .handler
            .handle(
                UpdateMetricTargetsCommand {
                    metric_set_id: set.id(),
                    changes: vec![
                        TargetChange {
                            key: key("traffic_count"),
                            target: TargetEdit::Set(1.0),
                            higher_is_better: None,
                        },
                        TargetChange {
                            key: key("median_income"),
                            target: TargetEdit::Set(1.0),
                            higher_is_better: None,
                        },
                    ],
                },
                CommandMetadata::test_fixture(),
            )
            .await;

        assert!(matches!(result, Err(AssessmentError::UnknownMetric(_))));
        let stored = f.sets.find_by_id(set.id()).await.unwrap().unwrap();
        assert_eq!(
            stored.definition(&key("traffic_count")).unwrap().target_value,
            Some(20_000.0)
        );
    }

    #[tokio::test]
    async fn failed_assessment_batch_restores_the_set_and_publishes_nothing() {
        let sets = Arc::new(InMemoryMetricSetRepository::new());
        let assessments = Arc::new(FailingBatchAssessments::default());
        let bus = Arc::new(InMemoryEventBus::new());
        let owner = CommandMetadata::test_fixture().user_id;
        let set = MetricSet::new(
            owner.clone(),
            "Drive-thru",
            None,
            vec![
                MetricDefinition::new(
                    key("traffic_count"),
                    "Traffic",
                    MetricCategory::Traffic,
                    true,
                )
                .with_target(20_000.0),
            ],
        )
        .unwrap();
        sets.save(&set).await.unwrap();
        let mut assessment = SiteAssessment::new(owner, set.id(), "Route 9", None).unwrap();
        assessment
            .record_metric_value(key("traffic_count"), Some(10_000.0), None)
            .unwrap();
        AssessmentRecalculator::recalculate(&mut assessment, &set);
        assessments.save(&assessment).await.unwrap();

        let handler =
            UpdateMetricTargetsHandler::new(sets.clone(), assessments.clone(), bus.clone());
        let result = handler
            .handle(
                UpdateMetricTargetsCommand {
                    metric_set_id: set.id(),
                    changes: vec![TargetChange {
                        key: key("traffic_count"),
                        target: TargetEdit::Set(40_000.0),
                        higher_is_better: None,
                    }],
                },
                CommandMetadata::test_fixture(),
            )
            .await;

        assert!(matches!(result, Err(AssessmentError::Infrastructure(_))));
        let stored_set = sets.find_by_id(set.id()).await.unwrap().unwrap();
        assert_eq!(
            stored_set.definition(&key("traffic_count")).unwrap().target_value,
            Some(20_000.0)
        );
        let stored = assessments.find_by_id(assessment.id()).await.unwrap().unwrap();
        assert_eq!(stored.overall_signal_score(), assessment.overall_signal_score());
        assert_eq!(bus.event_count(), 0);
    }

    #[tokio::test]
    async fn non_owner_is_forbidden() {
        let f = fixture();
        let (set, _) = seed(&f).await;

        let result = f
            .handler
            .handle(
                UpdateMetricTargetsCommand {
                    metric_set_id: set.id(),
                    changes: vec![],
                },
                CommandMetadata::new(UserId::new("someone-else").unwrap()),
            )
            .await;

        assert_eq!(result.unwrap_err(), AssessmentError::Forbidden);
    }
}
