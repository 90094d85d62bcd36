//! HTTP DTOs for assessment endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::assessment::{AssessmentUpdate, AssessmentView};
use crate::domain::assessment::{
    MetricBreakdown, MetricValue, SiteAssessment, SiteVisitGrade, SiteVisitRating,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Query parameters for listing assessments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAssessmentsParams {
    #[serde(default)]
    pub metric_set_id: Option<String>,
}

/// Request to start an assessment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssessmentRequest {
    pub metric_set_id: String,
    pub site_name: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// Request to record a metric value; `entered_value: null` clears it.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordMetricValueRequest {
    pub entered_value: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request to grade a site-visit criterion; `grade: null` clears it.
#[derive(Debug, Clone, Deserialize)]
pub struct RateSiteVisitRequest {
    pub grade: Option<SiteVisitGrade>,
    #[serde(default)]
    pub notes: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Assessment view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResponse {
    pub id: String,
    pub metric_set_id: String,
    pub site_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub metric_values: Vec<MetricValue>,
    pub site_visit_ratings: Vec<SiteVisitRating>,
    pub overall_signal_score: Option<f64>,
    pub completion_percentage: u8,
    pub created_at: String,
    pub updated_at: String,
}

impl From<SiteAssessment> for AssessmentResponse {
    fn from(assessment: SiteAssessment) -> Self {
        Self {
            id: assessment.id().to_string(),
            metric_set_id: assessment.metric_set_id().to_string(),
            site_name: assessment.site_name().to_string(),
            address: assessment.address().map(str::to_string),
            metric_values: assessment.metric_values().to_vec(),
            site_visit_ratings: assessment.site_visit_ratings().to_vec(),
            overall_signal_score: assessment.overall_signal_score().map(|s| s.value()),
            completion_percentage: assessment.completion_percentage().value(),
            created_at: assessment.created_at().to_rfc3339(),
            updated_at: assessment.updated_at().to_rfc3339(),
        }
    }
}

/// Assessment plus its per-metric breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentDetailResponse {
    pub assessment: AssessmentResponse,
    pub metric_set_name: String,
    pub breakdown: Vec<MetricBreakdown>,
}

impl From<AssessmentView> for AssessmentDetailResponse {
    fn from(view: AssessmentView) -> Self {
        Self {
            assessment: view.assessment.into(),
            metric_set_name: view.metric_set_name,
            breakdown: view.breakdown,
        }
    }
}

/// Result of a command that rescored an assessment.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentUpdateResponse {
    pub assessment: AssessmentResponse,
    pub scores_changed: bool,
}

impl From<AssessmentUpdate> for AssessmentUpdateResponse {
    fn from(update: AssessmentUpdate) -> Self {
        Self {
            scores_changed: update.outcome.changed(),
            assessment: update.assessment.into(),
        }
    }
}

/// A list of assessments without per-metric breakdowns.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentListResponse {
    pub items: Vec<AssessmentResponse>,
    pub total: usize,
}

impl From<Vec<SiteAssessment>> for AssessmentListResponse {
    fn from(assessments: Vec<SiteAssessment>) -> Self {
        Self {
            total: assessments.len(),
            items: assessments.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{MetricSetId, UserId};

    #[test]
    fn rate_request_parses_grade_letters() {
        let req: RateSiteVisitRequest = serde_json::from_str(r#"{"grade": "B"}"#).unwrap();
        assert_eq!(req.grade, Some(SiteVisitGrade::B));

        let req: RateSiteVisitRequest = serde_json::from_str(r#"{"grade": null}"#).unwrap();
        assert_eq!(req.grade, None);
    }

    #[test]
    fn assessment_response_conversion() {
        let assessment = SiteAssessment::new(
            UserId::new("user-1").unwrap(),
            MetricSetId::new(),
            "Harbor Plaza",
            Some("12 Dock Rd".to_string()),
        )
        .unwrap();
        let id = assessment.id().to_string();

        let response: AssessmentResponse = assessment.into();

        assert_eq!(response.id, id);
        assert_eq!(response.site_name, "Harbor Plaza");
        assert_eq!(response.completion_percentage, 0);
        assert!(response.overall_signal_score.is_none());
    }
}
