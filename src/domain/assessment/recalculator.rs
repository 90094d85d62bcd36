//! Recomputes an assessment's derived scores from its metric set.

use serde::{Deserialize, Serialize};

use super::{MetricCategory, MetricKey, MetricSet, SiteAssessment, SITE_VISIT_CRITERIA_COUNT};
use crate::domain::foundation::Percentage;
use crate::domain::scoring::{MetricScoreInput, ScoreEngine, SignalScore};

/// Before/after snapshot of one recalculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecalculationOutcome {
    pub previous_overall: Option<SignalScore>,
    pub overall_signal_score: Option<SignalScore>,
    pub previous_completion: Percentage,
    pub completion_percentage: Percentage,
    pub scored_metrics: usize,
    pub total_items: usize,
    pub completed_items: usize,
}

impl RecalculationOutcome {
    /// Whether the headline numbers moved.
    pub fn changed(&self) -> bool {
        self.previous_overall != self.overall_signal_score
            || self.previous_completion != self.completion_percentage
    }
}

/// One row of the per-metric score breakdown shown on an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricBreakdown {
    pub key: MetricKey,
    pub label: String,
    pub category: MetricCategory,
    pub higher_is_better: bool,
    pub target_value: Option<f64>,
    pub entered_value: Option<f64>,
    pub signal_score: Option<SignalScore>,
}

/// Applies the ScoreEngine to an assessment.
pub struct AssessmentRecalculator;

impl AssessmentRecalculator {
    /// Rescores every metric value, the overall signal and completion.
    ///
    /// Only metrics present in `metric_set` count; values recorded for keys
    /// the set no longer contains have their score cleared.
    pub fn recalculate(
        assessment: &mut SiteAssessment,
        metric_set: &MetricSet,
    ) -> RecalculationOutcome {
        let previous_overall = assessment.overall_signal_score();
        let previous_completion = assessment.completion_percentage();

        let metric_scores: Vec<(MetricKey, Option<SignalScore>)> = metric_set
            .metrics()
            .iter()
            .map(|definition| {
                let entered_value = assessment
                    .metric_value(&definition.key)
                    .and_then(|v| v.entered_value);
                let input = MetricScoreInput::new(
                    entered_value,
                    definition.target_value,
                    definition.higher_is_better,
                );
                let score = ScoreEngine::score_metric(&input, definition.key.dropdown());
                (definition.key.clone(), score)
            })
            .collect();

        let overall = ScoreEngine::overall_signal_score(metric_scores.iter().map(|(_, s)| *s));

        let entered_metrics = metric_set
            .metrics()
            .iter()
            .filter(|d| {
                assessment
                    .metric_value(&d.key)
                    .map(|v| v.is_entered())
                    .unwrap_or(false)
            })
            .count();
        let total_items = metric_set.metrics().len() + SITE_VISIT_CRITERIA_COUNT;
        let completed_items = entered_metrics + assessment.graded_criteria_count();
        let completion = ScoreEngine::completion_percentage(total_items, completed_items);

        let scored_metrics = metric_scores.iter().filter(|(_, s)| s.is_some()).count();
        assessment.apply_scores(&metric_scores, overall, completion);

        RecalculationOutcome {
            previous_overall,
            overall_signal_score: overall,
            previous_completion,
            completion_percentage: completion,
            scored_metrics,
            total_items,
            completed_items,
        }
    }

    /// Per-metric view joining the set's definitions with the assessment's values.
    pub fn breakdown(assessment: &SiteAssessment, metric_set: &MetricSet) -> Vec<MetricBreakdown> {
        metric_set
            .metrics()
            .iter()
            .map(|definition| {
                let value = assessment.metric_value(&definition.key);
                MetricBreakdown {
                    key: definition.key.clone(),
                    label: definition.label.clone(),
                    category: definition.category,
                    higher_is_better: definition.higher_is_better,
                    target_value: definition.target_value,
                    entered_value: value.and_then(|v| v.entered_value),
                    signal_score: value.and_then(|v| v.signal_score),
                }
            })
            .collect()
    }
}
