//! Site assessment aggregate.
//!
//! An assessment holds what the operator measured for one candidate site
//! (metric values and site-visit ratings) plus the scores derived from them.
//! Derived scores are only ever written by [`AssessmentRecalculator`].
//!
//! [`AssessmentRecalculator`]: super::AssessmentRecalculator

use serde::{Deserialize, Serialize};

use super::{AssessmentError, MetricKey, SiteVisitCriterion, SiteVisitGrade, SiteVisitRating};
use crate::domain::foundation::{
    AssessmentId, MetricSetId, Percentage, Timestamp, UserId, ValidationError,
};
use crate::domain::scoring::SignalScore;

/// Maximum length for a site name.
pub const MAX_SITE_NAME_LENGTH: usize = 300;

/// A recorded measurement for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricValue {
    pub key: MetricKey,
    pub entered_value: Option<f64>,
    pub signal_score: Option<SignalScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MetricValue {
    pub fn is_entered(&self) -> bool {
        self.entered_value.is_some()
    }
}

/// Site assessment aggregate.
///
/// # Invariants
///
/// - `site_name` is non-blank
/// - at most one `MetricValue` per key and one rating per criterion
/// - entered values are finite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteAssessment {
    id: AssessmentId,
    owner: UserId,
    metric_set_id: MetricSetId,
    site_name: String,
    address: Option<String>,
    metric_values: Vec<MetricValue>,
    site_visit_ratings: Vec<SiteVisitRating>,
    overall_signal_score: Option<SignalScore>,
    completion_percentage: Percentage,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl SiteAssessment {
    /// Creates an empty assessment of a site against a metric set.
    pub fn new(
        owner: UserId,
        metric_set_id: MetricSetId,
        site_name: impl Into<String>,
        address: Option<String>,
    ) -> Result<Self, AssessmentError> {
        let site_name = site_name.into();
        Self::validate_site_name(&site_name)?;

        let now = Timestamp::now();
        Ok(Self {
            id: AssessmentId::new(),
            owner,
            metric_set_id,
            site_name,
            address,
            metric_values: Vec::new(),
            site_visit_ratings: Vec::new(),
            overall_signal_score: None,
            completion_percentage: Percentage::ZERO,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute an assessment from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: AssessmentId,
        owner: UserId,
        metric_set_id: MetricSetId,
        site_name: String,
        address: Option<String>,
        metric_values: Vec<MetricValue>,
        site_visit_ratings: Vec<SiteVisitRating>,
        overall_signal_score: Option<SignalScore>,
        completion_percentage: Percentage,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner,
            metric_set_id,
            site_name,
            address,
            metric_values,
            site_visit_ratings,
            overall_signal_score,
            completion_percentage,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> AssessmentId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn metric_set_id(&self) -> MetricSetId {
        self.metric_set_id
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn metric_values(&self) -> &[MetricValue] {
        &self.metric_values
    }

    pub fn metric_value(&self, key: &MetricKey) -> Option<&MetricValue> {
        self.metric_values.iter().find(|v| &v.key == key)
    }

    pub fn site_visit_ratings(&self) -> &[SiteVisitRating] {
        &self.site_visit_ratings
    }

    pub fn site_visit_rating(&self, criterion: SiteVisitCriterion) -> Option<&SiteVisitRating> {
        self.site_visit_ratings.iter().find(|r| r.criterion == criterion)
    }

    pub fn overall_signal_score(&self) -> Option<SignalScore> {
        self.overall_signal_score
    }

    pub fn completion_percentage(&self) -> Percentage {
        self.completion_percentage
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

    /// Number of site-visit criteria that have a grade.
    pub fn graded_criteria_count(&self) -> usize {
        self.site_visit_ratings.iter().filter(|r| r.is_complete()).count()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Records (or clears, with `None`) the measured value for a metric.
    ///
    /// The stored signal score is left untouched until the next recalculation.
    pub fn record_metric_value(
        &mut self,
        key: MetricKey,
        entered_value: Option<f64>,
        notes: Option<String>,
    ) -> Result<(), AssessmentError> {
        if let Some(value) = entered_value {
            if !value.is_finite() {
                return Err(ValidationError::not_finite("entered_value").into());
            }
        }

        match self.metric_values.iter_mut().find(|v| v.key == key) {
            Some(existing) => {
                existing.entered_value = entered_value;
                if notes.is_some() {
                    existing.notes = notes;
                }
            }
            None => self.metric_values.push(MetricValue {
                key,
                entered_value,
                signal_score: None,
                notes,
            }),
        }
        self.touch();
        Ok(())
    }

    /// Removes the recorded value for a metric. Returns whether one existed.
    pub fn clear_metric_value(&mut self, key: &MetricKey) -> bool {
        let before = self.metric_values.len();
        self.metric_values.retain(|v| &v.key != key);
        let removed = self.metric_values.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Records the grade (or clears it, with `None`) for a site-visit criterion.
    pub fn rate_site_visit(
        &mut self,
        criterion: SiteVisitCriterion,
        grade: Option<SiteVisitGrade>,
        notes: Option<String>,
    ) {
        match self
            .site_visit_ratings
            .iter_mut()
            .find(|r| r.criterion == criterion)
        {
            Some(existing) => {
                existing.grade = grade;
                if notes.is_some() {
                    existing.notes = notes;
                }
            }
            None => self.site_visit_ratings.push(SiteVisitRating {
                criterion,
                grade,
                notes,
            }),
        }
        self.touch();
    }

    /// Writes derived scores. Only the recalculator calls this.
    pub(crate) fn apply_scores(
        &mut self,
        metric_scores: &[(MetricKey, Option<SignalScore>)],
        overall_signal_score: Option<SignalScore>,
        completion_percentage: Percentage,
    ) {
        for value in &mut self.metric_values {
            value.signal_score = metric_scores
                .iter()
                .find(|(key, _)| key == &value.key)
                .and_then(|(_, score)| *score);
        }
        self.overall_signal_score = overall_signal_score;
        self.completion_percentage = completion_percentage;
        self.touch();
    }

    fn validate_site_name(name: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("site_name"));
        }
        let len = name.chars().count();
        if len > MAX_SITE_NAME_LENGTH {
            return Err(ValidationError::out_of_range(
                "site_name",
                1,
                MAX_SITE_NAME_LENGTH as i32,
                len as i32,
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

    fn assessment() -> SiteAssessment {
        SiteAssessment::new(
            UserId::new("owner-1").unwrap(),
            MetricSetId::new(),
            "1200 Main St endcap",
            Some("1200 Main St".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn new_assessment_starts_empty() {
        let a = assessment();
        assert!(a.metric_values().is_empty());
        assert!(a.site_visit_ratings().is_empty());
        assert_eq!(a.overall_signal_score(), None);
        assert_eq!(a.completion_percentage(), Percentage::ZERO);
    }

    #[test]
    fn new_rejects_blank_site_name() {
        let result = SiteAssessment::new(UserId::new("u").unwrap(), MetricSetId::new(), "", None);
        assert!(matches!(result, Err(AssessmentError::ValidationFailed { .. })));
    }

    #[test]
    fn record_metric_value_upserts() {
        let mut a = assessment();
        a.record_metric_value(key("traffic_count"), Some(18_000.0), Some("AADT 2023".to_string()))
            .unwrap();
        a.record_metric_value(key("traffic_count"), Some(21_000.0), None).unwrap();

        assert_eq!(a.metric_values().len(), 1);
        let value = a.metric_value(&key("traffic_count")).unwrap();
        assert_eq!(value.entered_value, Some(21_000.0));
        assert_eq!(value.notes.as_deref(), Some("AADT 2023"));
    }

    #[test]
    fn record_metric_value_rejects_nan() {
        let mut a = assessment();
        let result = a.record_metric_value(key("traffic_count"), Some(f64::NAN), None);
        assert!(result.is_err());
        assert!(a.metric_values().is_empty());
    }

    #[test]
    fn record_metric_value_accepts_explicit_zero() {
        let mut a = assessment();
        a.record_metric_value(key("competitor_count"), Some(0.0), None).unwrap();
        assert!(a.metric_value(&key("competitor_count")).unwrap().is_entered());
    }

    #[test]
    fn clear_metric_value_removes_row() {
        let mut a = assessment();
        a.record_metric_value(key("traffic_count"), Some(1.0), None).unwrap();
        assert!(a.clear_metric_value(&key("traffic_count")));
        assert!(!a.clear_metric_value(&key("traffic_count")));
    }

    #[test]
    fn rate_site_visit_upserts() {
        let mut a = assessment();
        a.rate_site_visit(SiteVisitCriterion::Parking, Some(SiteVisitGrade::C), None);
        a.rate_site_visit(SiteVisitCriterion::Parking, Some(SiteVisitGrade::A), None);
        a.rate_site_visit(SiteVisitCriterion::Signage, None, Some("pending landlord".to_string()));

        assert_eq!(a.site_visit_ratings().len(), 2);
        assert_eq!(
            a.site_visit_rating(SiteVisitCriterion::Parking).unwrap().grade,
            Some(SiteVisitGrade::A)
        );
        assert_eq!(a.graded_criteria_count(), 1);
    }

    #[test]
    fn apply_scores_clears_scores_for_missing_keys() {
        let mut a = assessment();
        a.record_metric_value(key("traffic_count"), Some(1.0), None).unwrap();
        a.record_metric_value(key("orphaned_metric"), Some(1.0), None).unwrap();

        let score = SignalScore::clamped(55.0);
        a.apply_scores(&[(key("traffic_count"), score)], score, Percentage::new(18));

        assert_eq!(a.metric_value(&key("traffic_count")).unwrap().signal_score, score);
        assert_eq!(a.metric_value(&key("orphaned_metric")).unwrap().signal_score, None);
        assert_eq!(a.overall_signal_score(), score);
        assert_eq!(a.completion_percentage().value(), 18);
    }
}
