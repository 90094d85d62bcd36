//! HTTP routes for assessment endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    clear_metric_value, create_assessment, get_assessment, list_assessments, rate_site_visit,
    recalculate_assessment, record_metric_value, AssessmentHandlers,
};

/// Creates the assessment router with all endpoints.
pub fn assessment_routes(handlers: AssessmentHandlers) -> Router {
    Router::new()
        .route("/", post(create_assessment).get(list_assessments))
        .route("/:id", get(get_assessment))
        .route("/:id/metrics/:key", put(record_metric_value).delete(clear_metric_value))
        .route("/:id/site-visit/:criterion", put(rate_site_visit))
        .route("/:id/recalculate", post(recalculate_assessment))
        .with_state(handlers)
}
