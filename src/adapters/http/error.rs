//! JSON error responses shared by every endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::assessment::AssessmentError;
use crate::domain::foundation::ErrorCode;
use crate::domain::territory::TerritoryError;

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    /// Response for a malformed path parameter.
    pub fn invalid_id(resource: &str) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(Self::bad_request(format!("Invalid {} ID", resource))),
        )
            .into_response()
    }
}

/// HTTP status for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::AssessmentNotFound
        | ErrorCode::MetricSetNotFound
        | ErrorCode::MetricNotFound
        | ErrorCode::TerritoryAnalysisNotFound => StatusCode::NOT_FOUND,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::ScoringProviderError => StatusCode::BAD_GATEWAY,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn respond(code: ErrorCode, message: String) -> Response {
    let status = status_for(code);
    if status.is_server_error() {
        tracing::error!(%code, error = %message, "request failed");
        let public = if status == StatusCode::BAD_GATEWAY {
            message
        } else {
            "Internal server error".to_string()
        };
        return (status, Json(ErrorResponse::new(code, public))).into_response();
    }
    (status, Json(ErrorResponse::new(code, message))).into_response()
}

pub fn handle_assessment_error(error: AssessmentError) -> Response {
    respond(error.code(), error.message())
}

pub fn handle_territory_error(error: TerritoryError) -> Response {
    respond(error.code(), error.message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AssessmentId, TerritoryAnalysisId};

    #[test]
    fn not_found_maps_to_404() {
        let response = handle_assessment_error(AssessmentError::NotFound(AssessmentId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = handle_territory_error(TerritoryError::NotFound(TerritoryAnalysisId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unknown_metric_maps_to_404() {
        let response = handle_assessment_error(AssessmentError::unknown_metric("walk_score"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let response = handle_assessment_error(AssessmentError::Forbidden);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn validation_maps_to_400() {
        let response = handle_assessment_error(AssessmentError::validation("site_name", "empty"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn provider_failure_maps_to_502() {
        let response = handle_territory_error(TerritoryError::provider("rate limited"));
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn infrastructure_maps_to_500() {
        let response = handle_assessment_error(AssessmentError::infrastructure("pool timed out"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_codes_render_screaming_snake_case() {
        let error = ErrorResponse::new(ErrorCode::MetricSetNotFound, "gone");
        assert_eq!(error.code, "METRIC_SET_NOT_FOUND");
    }
}
