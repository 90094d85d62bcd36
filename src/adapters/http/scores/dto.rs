//! HTTP DTOs for score endpoints.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to score one metric.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricScoreRequest {
    #[serde(default)]
    pub entered_value: Option<f64>,
    #[serde(default)]
    pub target_value: Option<f64>,
    #[serde(default = "default_higher_is_better")]
    pub higher_is_better: bool,
    /// Metric key; dropdown metrics are recognized by it.
    #[serde(default)]
    pub metric_identifier: Option<String>,
}

fn default_higher_is_better() -> bool {
    true
}

/// Request to aggregate metric scores; `null` entries are unscored metrics.
#[derive(Debug, Clone, Deserialize)]
pub struct OverallScoreRequest {
    pub scores: Vec<Option<f64>>,
}

/// Request to compute completion.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionRequest {
    pub total_items: usize,
    pub completed_items: usize,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct MetricScoreResponse {
    pub signal_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverallScoreResponse {
    pub overall_signal_score: Option<f64>,
    pub scored_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionResponse {
    pub completion_percentage: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_request_defaults() {
        let req: MetricScoreRequest = serde_json::from_str("{}").unwrap();
        assert!(req.entered_value.is_none());
        assert!(req.higher_is_better);
        assert!(req.metric_identifier.is_none());
    }

    #[test]
    fn overall_request_accepts_nulls() {
        let req: OverallScoreRequest = serde_json::from_str(r#"{"scores":[80,null,60]}"#).unwrap();
        assert_eq!(req.scores, vec![Some(80.0), None, Some(60.0)]);
    }
}
