//! HTTP DTOs for metric set endpoints.

use serde::{Deserialize, Deserializer, Serialize};

use crate::application::handlers::metric_set::{
    MetricSetRescored, TargetChange, TargetEdit, UpdateMetricTargetsResult,
};
use crate::domain::assessment::{MetricCategory, MetricDefinition, MetricKey, MetricSet};
use crate::domain::foundation::ValidationError;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One metric in a create request.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricDefinitionRequest {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub category: MetricCategory,
    #[serde(default = "default_higher_is_better")]
    pub higher_is_better: bool,
    #[serde(default)]
    pub target_value: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

fn default_higher_is_better() -> bool {
    true
}

impl TryFrom<MetricDefinitionRequest> for MetricDefinition {
    type Error = ValidationError;

    fn try_from(req: MetricDefinitionRequest) -> Result<Self, Self::Error> {
        let mut definition = MetricDefinition::new(
            MetricKey::new(req.key)?,
            req.label,
            req.category,
            req.higher_is_better,
        );
        definition.target_value = req.target_value;
        definition.unit = req.unit;
        Ok(definition)
    }
}

/// Request to create a metric set.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMetricSetRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub metrics: Vec<MetricDefinitionRequest>,
}

/// One target edit. Omitting a field keeps the current value;
/// `target_value: null` clears the target.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetChangeRequest {
    pub key: String,
    #[serde(default, deserialize_with = "present")]
    pub target_value: Option<Option<f64>>,
    #[serde(default)]
    pub higher_is_better: Option<bool>,
}

/// Marks a field as present, so an explicit `null` is told apart from a
/// missing field.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Some)
}

impl TryFrom<TargetChangeRequest> for TargetChange {
    type Error = ValidationError;

    fn try_from(req: TargetChangeRequest) -> Result<Self, Self::Error> {
        Ok(TargetChange {
            key: MetricKey::new(req.key)?,
            target: req.target_value.map_or(TargetEdit::Keep, TargetEdit::from),
            higher_is_better: req.higher_is_better,
        })
    }
}

/// Request to update targets on a metric set.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTargetsRequest {
    pub changes: Vec<TargetChangeRequest>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Metric set view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct MetricSetResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub metrics: Vec<MetricDefinition>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<MetricSet> for MetricSetResponse {
    fn from(set: MetricSet) -> Self {
        Self {
            id: set.id().to_string(),
            name: set.name().to_string(),
            description: set.description().map(str::to_string),
            metrics: set.metrics().to_vec(),
            created_at: set.created_at().to_rfc3339(),
            updated_at: set.updated_at().to_rfc3339(),
        }
    }
}

/// The caller's metric sets.
#[derive(Debug, Clone, Serialize)]
pub struct MetricSetListResponse {
    pub items: Vec<MetricSetResponse>,
    pub total: usize,
}

impl From<Vec<MetricSet>> for MetricSetListResponse {
    fn from(sets: Vec<MetricSet>) -> Self {
        Self {
            total: sets.len(),
            items: sets.into_iter().map(Into::into).collect(),
        }
    }
}

/// Result of a target update.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateTargetsResponse {
    pub metric_set: MetricSetResponse,
    pub changed_keys: Vec<String>,
    pub rescored_assessments: usize,
}

impl From<UpdateMetricTargetsResult> for UpdateTargetsResponse {
    fn from(result: UpdateMetricTargetsResult) -> Self {
        Self {
            metric_set: result.metric_set.into(),
            changed_keys: result.changed_keys.into_iter().map(String::from).collect(),
            rescored_assessments: result.rescored_assessments,
        }
    }
}

/// Result of adding or removing a metric.
#[derive(Debug, Clone, Serialize)]
pub struct MetricSetRescoredResponse {
    pub metric_set: MetricSetResponse,
    pub rescored_assessments: usize,
}

impl From<MetricSetRescored> for MetricSetRescoredResponse {
    fn from(result: MetricSetRescored) -> Self {
        Self {
            metric_set: result.metric_set.into(),
            rescored_assessments: result.rescored_assessments,
        }
    }
}
