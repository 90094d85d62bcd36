//! Score Engine - metric signals, overall site signal, and completion.

use serde::{Deserialize, Serialize};

use super::{DropdownMetric, SignalScore};
use crate::domain::foundation::Percentage;

/// One entered measurement against one target.
///
/// `None` means "not provided", which is distinct from a provided zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricScoreInput {
    pub entered_value: Option<f64>,
    pub target_value: Option<f64>,
    pub higher_is_better: bool,
}

impl MetricScoreInput {
    pub fn new(
        entered_value: Option<f64>,
        target_value: Option<f64>,
        higher_is_better: bool,
    ) -> Self {
        Self {
            entered_value,
            target_value,
            higher_is_better,
        }
    }
}

/// Stateless scoring functions.
///
/// Absent or degenerate data yields `None` rather than an error; no input
/// makes these functions panic.
pub struct ScoreEngine;

impl ScoreEngine {
    /// Scores one metric, resolving `metric_identifier` against the dropdown allow-list.
    pub fn metric_signal_score(
        input: &MetricScoreInput,
        metric_identifier: Option<&str>,
    ) -> Option<SignalScore> {
        let dropdown = metric_identifier.and_then(DropdownMetric::from_identifier);
        Self::score_metric(input, dropdown)
    }

    /// Scores one metric.
    ///
    /// # Rules (first match wins)
    /// 1. No entered value: `None`
    /// 2. Dropdown metric: entered value clamped to 0-100, target ignored
    /// 3. No target: `None`
    /// 4. Zero target: higher-is-better hits with any non-negative entry;
    ///    lower-is-better only with an exact zero
    /// 5. Zero entry: 0 for higher-is-better; for lower-is-better 100 against a
    ///    positive target, 0 against a negative one
    /// 6. Otherwise the entered/target ratio (inverted for lower-is-better),
    ///    with sign mismatches pinned to 0 or 100, rounded and clamped
    pub fn score_metric(
        input: &MetricScoreInput,
        dropdown: Option<DropdownMetric>,
    ) -> Option<SignalScore> {
        let entered = input.entered_value?;
        if entered.is_nan() {
            return None;
        }

        if dropdown.is_some() {
            return SignalScore::clamped(entered);
        }

        let target = input.target_value?;
        if target.is_nan() {
            return None;
        }

        if target == 0.0 {
            let hit = if input.higher_is_better {
                entered >= 0.0
            } else {
                entered == 0.0
            };
            return Some(Self::pinned(hit));
        }

        if entered == 0.0 {
            return Some(Self::pinned(!input.higher_is_better && target > 0.0));
        }

        let raw = if input.higher_is_better {
            if target > 0.0 && entered < 0.0 {
                return Some(SignalScore::MIN);
            }
            (entered / target) * 100.0
        } else {
            if target > 0.0 && entered < 0.0 {
                return Some(SignalScore::MAX);
            }
            if target < 0.0 && entered > 0.0 {
                return Some(SignalScore::MIN);
            }
            (target / entered) * 100.0
        };

        SignalScore::clamped(raw.round())
    }

    /// Rounded mean of the present scores; `None` when nothing was scored.
    pub fn overall_signal_score<I>(scores: I) -> Option<SignalScore>
    where
        I: IntoIterator<Item = Option<SignalScore>>,
    {
        let (sum, count) = scores
            .into_iter()
            .flatten()
            .fold((0.0_f64, 0_u32), |(sum, count), score| (sum + score.value(), count + 1));

        if count == 0 {
            return None;
        }

        SignalScore::clamped((sum / f64::from(count)).round())
    }

    /// Share of completed items, rounded and clamped to 0-100.
    pub fn completion_percentage(total_items: usize, completed_items: usize) -> Percentage {
        if total_items == 0 {
            return Percentage::ZERO;
        }

        let ratio = completed_items as f64 / total_items as f64 * 100.0;
        Percentage::from_f64_clamped(ratio).unwrap_or(Percentage::ZERO)
    }

    fn pinned(hit: bool) -> SignalScore {
        if hit {
            SignalScore::MAX
        } else {
            SignalScore::MIN
        }
    }
}
