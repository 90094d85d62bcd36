//! Metric set aggregate - the target configuration sites are scored against.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::AssessmentError;
use crate::domain::foundation::{MetricSetId, Timestamp, UserId, ValidationError};
use crate::domain::scoring::DropdownMetric;

/// Maximum length for a metric set name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Stable identifier of a metric within a set (e.g. `daytime_population`).
///
/// Lowercase ASCII letters, digits and underscores, starting with a letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MetricKey(String);

impl MetricKey {
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ValidationError::empty_field("metric_key"));
        }
        let starts_with_letter = key.starts_with(|c: char| c.is_ascii_lowercase());
        let well_formed = key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !starts_with_letter || !well_formed {
            return Err(ValidationError::invalid_format(
                "metric_key",
                format!("'{}' must be snake_case", key),
            ));
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The dropdown metric this key names, if any.
    pub fn dropdown(&self) -> Option<DropdownMetric> {
        DropdownMetric::from_identifier(&self.0)
    }
}

impl TryFrom<String> for MetricKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MetricKey> for String {
    fn from(key: MetricKey) -> Self {
        key.0
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Grouping used when presenting metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    Demographics,
    Traffic,
    Competition,
    Economics,
    MarketSaturation,
    #[default]
    Other,
}

/// One configured metric: what is measured, which way is good, and the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDefinition {
    pub key: MetricKey,
    pub label: String,
    #[serde(default)]
    pub category: MetricCategory,
    pub higher_is_better: bool,
    pub target_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl MetricDefinition {
    pub fn new(
        key: MetricKey,
        label: impl Into<String>,
        category: MetricCategory,
        higher_is_better: bool,
    ) -> Self {
        Self {
            key,
            label: label.into(),
            category,
            higher_is_better,
            target_value: None,
            unit: None,
        }
    }

    pub fn with_target(mut self, target: f64) -> Self {
        self.target_value = Some(target);
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.label.trim().is_empty() {
            return Err(ValidationError::empty_field("label"));
        }
        validate_target(self.target_value)
    }
}

fn validate_target(target: Option<f64>) -> Result<(), ValidationError> {
    match target {
        Some(value) if !value.is_finite() => Err(ValidationError::not_finite("target_value")),
        _ => Ok(()),
    }
}

/// Metric set aggregate.
///
/// # Invariants
///
/// - `name` is 1-200 characters, non-blank
/// - metric keys are unique
/// - every target is finite when present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    id: MetricSetId,
    owner: UserId,
    name: String,
    description: Option<String>,
    metrics: Vec<MetricDefinition>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl MetricSet {
    /// Creates a new metric set.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for a bad name, duplicate keys, blank labels or
    ///   non-finite targets
    pub fn new(
        owner: UserId,
        name: impl Into<String>,
        description: Option<String>,
        metrics: Vec<MetricDefinition>,
    ) -> Result<Self, AssessmentError> {
        let name = name.into();
        Self::validate_name(&name)?;

        let mut set = Self {
            id: MetricSetId::new(),
            owner,
            name,
            description,
            metrics: Vec::with_capacity(metrics.len()),
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        };
        for metric in metrics {
            set.push_metric(metric)?;
        }
        Ok(set)
    }

    /// Reconstitute a metric set from persistence (no validation).
    pub fn reconstitute(
        id: MetricSetId,
        owner: UserId,
        name: String,
        description: Option<String>,
        metrics: Vec<MetricDefinition>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner,
            name,
            description,
            metrics,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> MetricSetId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn metrics(&self) -> &[MetricDefinition] {
        &self.metrics
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }

    pub fn definition(&self, key: &MetricKey) -> Option<&MetricDefinition> {
        self.metrics.iter().find(|m| &m.key == key)
    }

    pub fn contains(&self, key: &MetricKey) -> bool {
        self.definition(key).is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Sets or clears the target for a metric. Returns whether anything changed.
    pub fn update_target(
        &mut self,
        key: &MetricKey,
        target_value: Option<f64>,
    ) -> Result<bool, AssessmentError> {
        validate_target(target_value)?;
        let metric = self.definition_mut(key)?;
        if metric.target_value == target_value {
            return Ok(false);
        }
        metric.target_value = target_value;
        self.touch();
        Ok(true)
    }

    /// Flips the improvement direction for a metric. Returns whether anything changed.
    pub fn set_direction(
        &mut self,
        key: &MetricKey,
        higher_is_better: bool,
    ) -> Result<bool, AssessmentError> {
        let metric = self.definition_mut(key)?;
        if metric.higher_is_better == higher_is_better {
            return Ok(false);
        }
        metric.higher_is_better = higher_is_better;
        self.touch();
        Ok(true)
    }

    pub fn add_metric(&mut self, metric: MetricDefinition) -> Result<(), AssessmentError> {
        self.push_metric(metric)?;
        self.touch();
        Ok(())
    }

    pub fn remove_metric(&mut self, key: &MetricKey) -> Result<MetricDefinition, AssessmentError> {
        let index = self
            .metrics
            .iter()
            .position(|m| &m.key == key)
            .ok_or_else(|| AssessmentError::unknown_metric(key.as_str()))?;
        let removed = self.metrics.remove(index);
        self.touch();
        Ok(removed)
    }

    fn push_metric(&mut self, metric: MetricDefinition) -> Result<(), AssessmentError> {
        metric.validate()?;
        if self.contains(&metric.key) {
            return Err(ValidationError::duplicate("metric_key", metric.key.as_str()).into());
        }
        self.metrics.push(metric);
        Ok(())
    }

    fn definition_mut(
        &mut self,
        key: &MetricKey,
    ) -> Result<&mut MetricDefinition, AssessmentError> {
        self.metrics
            .iter_mut()
            .find(|m| &m.key == key)
            .ok_or_else(|| AssessmentError::unknown_metric(key.as_str()))
    }

    fn validate_name(name: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(ValidationError::out_of_range(
                "name",
                1,
                MAX_NAME_LENGTH as i32,
                name.chars().count() as i32,
            ));
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> MetricKey {
        MetricKey::new(k).unwrap()
    }

    fn owner() -> UserId {
        UserId::new("owner-1").unwrap()
    }

    fn sample_set() -> MetricSet {
        MetricSet::new(
            owner(),
            "Quick service - suburban",
            None,
            vec![
                MetricDefinition::new(
                    key("daytime_population"),
                    "Daytime population",
                    MetricCategory::Demographics,
                    true,
                )
                .with_target(25_000.0),
                MetricDefinition::new(
                    key("competitor_count"),
                    "Competitors within 1mi",
                    MetricCategory::Competition,
                    false,
                )
                .with_target(3.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn metric_key_accepts_snake_case() {
        assert!(MetricKey::new("median_income_2024").is_ok());
    }

    #[test]
    fn metric_key_rejects_bad_shapes() {
        assert!(MetricKey::new("").is_err());
        assert!(MetricKey::new("Median").is_err());
        assert!(MetricKey::new("2nd_metric").is_err());
        assert!(MetricKey::new("has space").is_err());
    }

    #[test]
    fn metric_key_knows_dropdowns() {
        assert_eq!(
            key("demand_supply_balance").dropdown(),
            Some(DropdownMetric::SupplyDemandBalance)
        );
        assert_eq!(key("daytime_population").dropdown(), None);
    }

    #[test]
    fn new_rejects_blank_name() {
        let result = MetricSet::new(owner(), "  ", None, vec![]);
        assert!(matches!(result, Err(AssessmentError::ValidationFailed { .. })));
    }

    #[test]
    fn new_rejects_duplicate_keys() {
        let metric = MetricDefinition::new(
            key("traffic_count"),
            "Traffic",
            MetricCategory::Traffic,
            true,
        );
        let result = MetricSet::new(owner(), "Dupes", None, vec![metric.clone(), metric]);
        match result {
            Err(AssessmentError::ValidationFailed { field, .. }) => assert_eq!(field, "metric_key"),
            other => panic!("expected duplicate error, got {:?}", other),
        }
    }

    #[test]
    fn new_rejects_non_finite_target() {
        let metric = MetricDefinition::new(
            key("traffic_count"),
            "Traffic",
            MetricCategory::Traffic,
            true,
        )
        .with_target(f64::INFINITY);
        assert!(MetricSet::new(owner(), "Bad", None, vec![metric]).is_err());
    }

    #[test]
    fn update_target_reports_change() {
        let mut set = sample_set();
        assert!(set.update_target(&key("competitor_count"), Some(5.0)).unwrap());
        assert!(!set.update_target(&key("competitor_count"), Some(5.0)).unwrap());
        assert_eq!(
            set.definition(&key("competitor_count")).unwrap().target_value,
            Some(5.0)
        );
    }

    #[test]
    fn update_target_can_clear() {
        let mut set = sample_set();
        assert!(set.update_target(&key("daytime_population"), None).unwrap());
        assert_eq!(set.definition(&key("daytime_population")).unwrap().target_value, None);
    }

    #[test]
    fn update_target_unknown_metric_fails() {
        let mut set = sample_set();
        let result = set.update_target(&key("parking_spaces"), Some(40.0));
        assert_eq!(result, Err(AssessmentError::UnknownMetric("parking_spaces".to_string())));
    }

    #[test]
    fn set_direction_flips_flag() {
        let mut set = sample_set();
        assert!(set.set_direction(&key("daytime_population"), false).unwrap());
        assert!(!set.definition(&key("daytime_population")).unwrap().higher_is_better);
    }

    #[test]
    fn add_and_remove_metric() {
        let mut set = sample_set();
        let parking =
            MetricDefinition::new(key("parking_spaces"), "Parking", MetricCategory::Other, true);
        set.add_metric(parking).unwrap();
        assert_eq!(set.metrics().len(), 3);

        let removed = set.remove_metric(&key("competitor_count")).unwrap();
        assert_eq!(removed.label, "Competitors within 1mi");
        assert_eq!(set.metrics().len(), 2);
        assert!(set.remove_metric(&key("competitor_count")).is_err());
    }

    #[test]
    fn metric_definition_deserializes_with_defaults() {
        let json = r#"{"key":"foot_traffic","label":"Foot traffic",
            "higher_is_better":true,"target_value":null}"#;
        let def: MetricDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.category, MetricCategory::Other);
        assert_eq!(def.unit, None);
    }
}
