//! AddMetricHandler - Command handler for extending a metric set.
//!
//! A new metric raises every assessment's item count, so completion drops
//! until a value is entered for it.

use std::sync::Arc;

use super::{load_owned_set, persist_with_rescored, MetricSetRescored};
use crate::domain::assessment::{AssessmentError, MetricDefinition, MetricSetMetricsChanged};
use crate::domain::foundation::{CommandMetadata, DomainEvent, MetricSetId};
use crate::ports::{AssessmentRepository, EventPublisher, MetricSetRepository};

/// Command to add one metric definition to a set.
#[derive(Debug, Clone)]
pub struct AddMetricCommand {
    pub metric_set_id: MetricSetId,
    pub metric: MetricDefinition,
}

pub struct AddMetricHandler {
    metric_sets: Arc<dyn MetricSetRepository>,
    assessments: Arc<dyn AssessmentRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl AddMetricHandler {
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
        cmd: AddMetricCommand,
        metadata: CommandMetadata,
    ) -> Result<MetricSetRescored, AssessmentError> {
        let original =
            load_owned_set(self.metric_sets.as_ref(), cmd.metric_set_id, &metadata.user_id).await?;
        let mut set = original.clone();
        let key = cmd.metric.key.clone();
        set.add_metric(cmd.metric)?;

        let rescored = persist_with_rescored(
            self.metric_sets.as_ref(),
            self.assessments.as_ref(),
            &original,
            &set,
            &metadata,
        )
        .await?;

        let changed = MetricSetMetricsChanged::added(set.id(), key.clone()).to_envelope()?;
        let mut envelopes = vec![metadata.stamp(changed)];
        envelopes.extend(rescored.envelopes);
        self.publisher.publish_all(envelopes).await?;

        tracing::info!(
            metric_set_id = %set.id(),
            key = %key,
            rescored = rescored.count,
            "metric added"
        );

        Ok(MetricSetRescored {
            metric_set: set,
            rescored_assessments: rescored.count,
        })
    }
}
