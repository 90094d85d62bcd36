//! Assessment domain events.
//!
//! - `AssessmentScoresRecalculated` - derived scores of an assessment were refreshed
//! - `MetricTargetsUpdated` - targets or directions of a metric set changed
//! - `MetricSetMetricsChanged` - a metric was added to or removed from a set

use serde::{Deserialize, Serialize};

use super::{MetricKey, RecalculationOutcome, SiteAssessment};
use crate::domain::foundation::{
    AssessmentId, DomainEvent, EventId, MetricSetId, Percentage, Timestamp,
};
use crate::domain::scoring::SignalScore;

// ════════════════════════════════════════════════════════════════════════════
// AssessmentScoresRecalculated
// ════════════════════════════════════════════════════════════════════════════

/// Published after an assessment's signal scores and completion are recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentScoresRecalculated {
    pub event_id: EventId,
    pub assessment_id: AssessmentId,
    pub metric_set_id: MetricSetId,

    /// New overall signal, `None` when no metric could be scored.
    pub overall_signal_score: Option<SignalScore>,

    pub completion_percentage: Percentage,
    pub recalculated_at: Timestamp,
}

impl AssessmentScoresRecalculated {
    pub fn from_outcome(assessment: &SiteAssessment, outcome: &RecalculationOutcome) -> Self {
        Self {
            event_id: EventId::new(),
            assessment_id: assessment.id(),
            metric_set_id: assessment.metric_set_id(),
            overall_signal_score: outcome.overall_signal_score,
            completion_percentage: outcome.completion_percentage,
            recalculated_at: Timestamp::now(),
        }
    }
}

impl DomainEvent for AssessmentScoresRecalculated {
    const EVENT_TYPE: &'static str = "assessment.scores_recalculated.v1";
    const AGGREGATE_TYPE: &'static str = "SiteAssessment";

    fn event_id(&self) -> &EventId {
        &self.event_id
    }

    fn aggregate_id(&self) -> String {
        self.assessment_id.to_string()
    }

    fn occurred_at(&self) -> Timestamp {
        self.recalculated_at
    }
}

// ════════════════════════════════════════════════════════════════════════════
// MetricTargetsUpdated
// ════════════════════════════════════════════════════════════════════════════

/// Published when one or more metric targets in a set change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricTargetsUpdated {
    pub event_id: EventId,
    pub metric_set_id: MetricSetId,
    pub changed_keys: Vec<MetricKey>,
    pub updated_at: Timestamp,
}

impl MetricTargetsUpdated {
    pub fn new(metric_set_id: MetricSetId, changed_keys: Vec<MetricKey>) -> Self {
        Self {
            event_id: EventId::new(),
            metric_set_id,
            changed_keys,
            updated_at: Timestamp::now(),
        }
    }
}

impl DomainEvent for MetricTargetsUpdated {
    const EVENT_TYPE: &'static str = "metric_set.targets_updated.v1";
    const AGGREGATE_TYPE: &'static str = "MetricSet";

    fn event_id(&self) -> &EventId {
        &self.event_id
    }

    fn aggregate_id(&self) -> String {
        self.metric_set_id.to_string()
    }

    fn occurred_at(&self) -> Timestamp {
        self.updated_at
    }
}

// ════════════════════════════════════════════════════════════════════════════
// MetricSetMetricsChanged
// ════════════════════════════════════════════════════════════════════════════

/// Published when a metric set gains or loses a metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSetMetricsChanged {
    pub event_id: EventId,
    pub metric_set_id: MetricSetId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_key: Option<MetricKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed_key: Option<MetricKey>,
    pub changed_at: Timestamp,
}

impl MetricSetMetricsChanged {
    pub fn added(metric_set_id: MetricSetId, key: MetricKey) -> Self {
        Self {
            event_id: EventId::new(),
            metric_set_id,
            added_key: Some(key),
            removed_key: None,
            changed_at: Timestamp::now(),
        }
    }

    pub fn removed(metric_set_id: MetricSetId, key: MetricKey) -> Self {
        Self {
            event_id: EventId::new(),
            metric_set_id,
            added_key: None,
            removed_key: Some(key),
            changed_at: Timestamp::now(),
        }
    }
}

impl DomainEvent for MetricSetMetricsChanged {
    const EVENT_TYPE: &'static str = "metric_set.metrics_changed.v1";
    const AGGREGATE_TYPE: &'static str = "MetricSet";

    fn event_id(&self) -> &EventId {
        &self.event_id
    }

    fn aggregate_id(&self) -> String {
        self.metric_set_id.to_string()
    }

    fn occurred_at(&self) -> Timestamp {
        self.changed_at
    }
}
