//! Top-level axum router.
//!
//! Builds every application handler from the ports in [`AppState`], nests the
//! per-module routers under `/api`, and applies tracing, CORS, and timeout
//! layers.

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::application::handlers::{
    AddMetricHandler, ClearMetricValueHandler, CreateAssessmentHandler, CreateMetricSetHandler,
    GetAssessmentHandler, GetMetricSetHandler, GetTerritoryAnalysisHandler, ListAssessmentsHandler,
    ListMetricSetsHandler, ListTerritoryAnalysesHandler, RateSiteVisitHandler,
    RecalculateAssessmentHandler, RecordMetricValueHandler, RemoveMetricHandler,
    ScoreTerritoryHandler, UpdateMetricTargetsHandler,
};
use crate::config::ServerConfig;
use crate::ports::{
    AssessmentRepository, EventPublisher, MetricSetRepository, TerritoryAnalysisRepository,
    TerritoryScoringProvider,
};

use super::assessment::{assessment_routes, AssessmentHandlers};
use super::metric_set::{metric_set_routes, MetricSetHandlers};
use super::middleware::{REQUEST_ID_HEADER, USER_ID_HEADER};
use super::scores::score_routes;
use super::territory::{territory_routes, TerritoryHandlers};

/// Ports the HTTP layer is wired against.
#[derive(Clone)]
pub struct AppState {
    pub metric_sets: Arc<dyn MetricSetRepository>,
    pub assessments: Arc<dyn AssessmentRepository>,
    pub territory_analyses: Arc<dyn TerritoryAnalysisRepository>,
    pub scoring_provider: Arc<dyn TerritoryScoringProvider>,
    pub publisher: Arc<dyn EventPublisher>,
}

impl AppState {
    fn metric_set_handlers(&self) -> MetricSetHandlers {
        MetricSetHandlers::new(
            Arc::new(CreateMetricSetHandler::new(self.metric_sets.clone())),
            Arc::new(GetMetricSetHandler::new(self.metric_sets.clone())),
            Arc::new(ListMetricSetsHandler::new(self.metric_sets.clone())),
            Arc::new(UpdateMetricTargetsHandler::new(
                self.metric_sets.clone(),
                self.assessments.clone(),
                self.publisher.clone(),
            )),
            Arc::new(AddMetricHandler::new(
                self.metric_sets.clone(),
                self.assessments.clone(),
                self.publisher.clone(),
            )),
            Arc::new(RemoveMetricHandler::new(
                self.metric_sets.clone(),
                self.assessments.clone(),
                self.publisher.clone(),
            )),
        )
    }

    fn assessment_handlers(&self) -> AssessmentHandlers {
        AssessmentHandlers::new(
            Arc::new(CreateAssessmentHandler::new(
                self.assessments.clone(),
                self.metric_sets.clone(),
            )),
            Arc::new(GetAssessmentHandler::new(
                self.assessments.clone(),
                self.metric_sets.clone(),
            )),
            Arc::new(ListAssessmentsHandler::new(
                self.assessments.clone(),
                self.metric_sets.clone(),
            )),
            Arc::new(RecordMetricValueHandler::new(
                self.assessments.clone(),
                self.metric_sets.clone(),
                self.publisher.clone(),
            )),
            Arc::new(ClearMetricValueHandler::new(
                self.assessments.clone(),
                self.metric_sets.clone(),
                self.publisher.clone(),
            )),
            Arc::new(RateSiteVisitHandler::new(
                self.assessments.clone(),
                self.metric_sets.clone(),
                self.publisher.clone(),
            )),
            Arc::new(RecalculateAssessmentHandler::new(
                self.assessments.clone(),
                self.metric_sets.clone(),
                self.publisher.clone(),
            )),
        )
    }

    fn territory_handlers(&self) -> TerritoryHandlers {
        TerritoryHandlers::new(
            Arc::new(ScoreTerritoryHandler::new(
                self.scoring_provider.clone(),
                self.territory_analyses.clone(),
            )),
            Arc::new(GetTerritoryAnalysisHandler::new(
                self.territory_analyses.clone(),
            )),
            Arc::new(ListTerritoryAnalysesHandler::new(
                self.territory_analyses.clone(),
            )),
        )
    }
}

/// API routes without the outer middleware layers.
pub fn api_routes(state: &AppState) -> Router {
    Router::new()
        .nest("/api/scores", score_routes())
        .nest("/api/metric-sets", metric_set_routes(state.metric_set_handlers()))
        .nest("/api/assessments", assessment_routes(state.assessment_handlers()))
        .nest("/api/territories", territory_routes(state.territory_handlers()))
        .route("/health", get(health))
}

/// The full application router.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    api_routes(&state)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

/// GET /health - Liveness check
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// CORS policy: the configured origins, or any origin outside production
/// when none are configured.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(USER_ID_HEADER),
            HeaderName::from_static(REQUEST_ID_HEADER),
        ]);

    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if !origins.is_empty() {
        base.allow_origin(AllowOrigin::list(origins))
    } else if server.is_production() {
        base
    } else {
        base.allow_origin(Any)
    }
}
