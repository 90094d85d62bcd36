//! HTTP handlers for assessment endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{handle_assessment_error, ErrorResponse};
use crate::adapters::http::middleware::RequireUser;
use crate::application::handlers::assessment::{
    ClearMetricValueCommand, ClearMetricValueHandler, CreateAssessmentCommand,
    CreateAssessmentHandler, GetAssessmentHandler, GetAssessmentQuery, ListAssessmentsHandler,
    ListAssessmentsQuery, RateSiteVisitCommand, RateSiteVisitHandler, RecalculateAssessmentCommand,
    RecalculateAssessmentHandler, RecordMetricValueCommand, RecordMetricValueHandler,
};
use crate::domain::assessment::{MetricKey, SiteVisitCriterion};
use crate::domain::foundation::{AssessmentId, MetricSetId};

use super::dto::{
    AssessmentDetailResponse, AssessmentListResponse, AssessmentResponse, AssessmentUpdateResponse,
    CreateAssessmentRequest, ListAssessmentsParams, RateSiteVisitRequest, RecordMetricValueRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AssessmentHandlers {
    create_handler: Arc<CreateAssessmentHandler>,
    get_handler: Arc<GetAssessmentHandler>,
    list_handler: Arc<ListAssessmentsHandler>,
    record_handler: Arc<RecordMetricValueHandler>,
    clear_handler: Arc<ClearMetricValueHandler>,
    rate_handler: Arc<RateSiteVisitHandler>,
    recalculate_handler: Arc<RecalculateAssessmentHandler>,
}

impl AssessmentHandlers {
    pub fn new(
        create_handler: Arc<CreateAssessmentHandler>,
        get_handler: Arc<GetAssessmentHandler>,
        list_handler: Arc<ListAssessmentsHandler>,
        record_handler: Arc<RecordMetricValueHandler>,
        clear_handler: Arc<ClearMetricValueHandler>,
        rate_handler: Arc<RateSiteVisitHandler>,
        recalculate_handler: Arc<RecalculateAssessmentHandler>,
    ) -> Self {
        Self {
            create_handler,
            get_handler,
            list_handler,
            record_handler,
            clear_handler,
            rate_handler,
            recalculate_handler,
        }
    }
}

fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(message))).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/assessments - Start an assessment
pub async fn create_assessment(
    State(handlers): State<AssessmentHandlers>,
    RequireUser(caller): RequireUser,
    Json(req): Json<CreateAssessmentRequest>,
) -> Response {
    let Ok(metric_set_id) = req.metric_set_id.parse::<MetricSetId>() else {
        return ErrorResponse::invalid_id("metric set");
    };

    let cmd = CreateAssessmentCommand {
        metric_set_id,
        site_name: req.site_name,
        address: req.address,
    };

    match handlers.create_handler.handle(cmd, caller.metadata()).await {
        Ok(assessment) => {
            let response: AssessmentResponse = assessment.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// GET /api/assessments - List the caller's assessments, optionally for one metric set
pub async fn list_assessments(
    State(handlers): State<AssessmentHandlers>,
    RequireUser(caller): RequireUser,
    Query(params): Query<ListAssessmentsParams>,
) -> Response {
    let metric_set_id = match params.metric_set_id {
        Some(raw) => match raw.parse::<MetricSetId>() {
            Ok(id) => Some(id),
            Err(_) => return ErrorResponse::invalid_id("metric set"),
        },
        None => None,
    };

    let query = ListAssessmentsQuery {
        user_id: caller.user_id,
        metric_set_id,
    };

    match handlers.list_handler.handle(query).await {
        Ok(assessments) => {
            let response: AssessmentListResponse = assessments.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// GET /api/assessments/:id - Assessment with per-metric breakdown
pub async fn get_assessment(
    State(handlers): State<AssessmentHandlers>,
    RequireUser(caller): RequireUser,
    Path(assessment_id): Path<String>,
) -> Response {
    let Ok(assessment_id) = assessment_id.parse::<AssessmentId>() else {
        return ErrorResponse::invalid_id("assessment");
    };

    let query = GetAssessmentQuery {
        assessment_id,
        user_id: caller.user_id,
    };

    match handlers.get_handler.handle(query).await {
        Ok(view) => {
            let response: AssessmentDetailResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// PUT /api/assessments/:id/metrics/:key - Record a metric value
pub async fn record_metric_value(
    State(handlers): State<AssessmentHandlers>,
    RequireUser(caller): RequireUser,
    Path((assessment_id, key)): Path<(String, String)>,
    Json(req): Json<RecordMetricValueRequest>,
) -> Response {
    let Ok(assessment_id) = assessment_id.parse::<AssessmentId>() else {
        return ErrorResponse::invalid_id("assessment");
    };
    let key = match MetricKey::new(key) {
        Ok(key) => key,
        Err(e) => return bad_request(e.to_string()),
    };

    let cmd = RecordMetricValueCommand {
        assessment_id,
        key,
        entered_value: req.entered_value,
        notes: req.notes,
    };

    match handlers.record_handler.handle(cmd, caller.metadata()).await {
        Ok(update) => {
            let response: AssessmentUpdateResponse = update.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// DELETE /api/assessments/:id/metrics/:key - Remove a metric value
pub async fn clear_metric_value(
    State(handlers): State<AssessmentHandlers>,
    RequireUser(caller): RequireUser,
    Path((assessment_id, key)): Path<(String, String)>,
) -> Response {
    let Ok(assessment_id) = assessment_id.parse::<AssessmentId>() else {
        return ErrorResponse::invalid_id("assessment");
    };
    let key = match MetricKey::new(key) {
        Ok(key) => key,
        Err(e) => return bad_request(e.to_string()),
    };

    let cmd = ClearMetricValueCommand { assessment_id, key };

    match handlers.clear_handler.handle(cmd, caller.metadata()).await {
        Ok(update) => {
            let response: AssessmentUpdateResponse = update.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// PUT /api/assessments/:id/site-visit/:criterion - Grade a site-visit criterion
pub async fn rate_site_visit(
    State(handlers): State<AssessmentHandlers>,
    RequireUser(caller): RequireUser,
    Path((assessment_id, criterion)): Path<(String, String)>,
    Json(req): Json<RateSiteVisitRequest>,
) -> Response {
    let Ok(assessment_id) = assessment_id.parse::<AssessmentId>() else {
        return ErrorResponse::invalid_id("assessment");
    };
    let criterion = match criterion.parse::<SiteVisitCriterion>() {
        Ok(criterion) => criterion,
        Err(e) => return bad_request(e.to_string()),
    };

    let cmd = RateSiteVisitCommand {
        assessment_id,
        criterion,
        grade: req.grade,
        notes: req.notes,
    };

    match handlers.rate_handler.handle(cmd, caller.metadata()).await {
        Ok(update) => {
            let response: AssessmentUpdateResponse = update.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// POST /api/assessments/:id/recalculate - Recompute scores
pub async fn recalculate_assessment(
    State(handlers): State<AssessmentHandlers>,
    RequireUser(caller): RequireUser,
    Path(assessment_id): Path<String>,
) -> Response {
    let Ok(assessment_id) = assessment_id.parse::<AssessmentId>() else {
        return ErrorResponse::invalid_id("assessment");
    };

    let cmd = RecalculateAssessmentCommand { assessment_id };

    match handlers
        .recalculate_handler
        .handle(cmd, caller.metadata())
        .await
    {
        Ok(update) => {
            let response: AssessmentUpdateResponse = update.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}
