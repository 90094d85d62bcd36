//! HTTP handlers for metric set endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{handle_assessment_error, ErrorResponse};
use crate::adapters::http::middleware::RequireUser;
use crate::application::handlers::metric_set::{
    AddMetricCommand, AddMetricHandler, CreateMetricSetCommand, CreateMetricSetHandler,
    GetMetricSetHandler, GetMetricSetQuery, ListMetricSetsHandler, ListMetricSetsQuery,
    RemoveMetricCommand, RemoveMetricHandler, TargetChange, UpdateMetricTargetsCommand,
    UpdateMetricTargetsHandler,
};
use crate::domain::assessment::{MetricDefinition, MetricKey};
use crate::domain::foundation::MetricSetId;

use super::dto::{
    CreateMetricSetRequest, MetricDefinitionRequest, MetricSetListResponse, MetricSetResponse,
    MetricSetRescoredResponse, UpdateTargetsRequest, UpdateTargetsResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct MetricSetHandlers {
    create_handler: Arc<CreateMetricSetHandler>,
    get_handler: Arc<GetMetricSetHandler>,
    list_handler: Arc<ListMetricSetsHandler>,
    update_targets_handler: Arc<UpdateMetricTargetsHandler>,
    add_metric_handler: Arc<AddMetricHandler>,
    remove_metric_handler: Arc<RemoveMetricHandler>,
}

impl MetricSetHandlers {
    pub fn new(
        create_handler: Arc<CreateMetricSetHandler>,
        get_handler: Arc<GetMetricSetHandler>,
        list_handler: Arc<ListMetricSetsHandler>,
        update_targets_handler: Arc<UpdateMetricTargetsHandler>,
        add_metric_handler: Arc<AddMetricHandler>,
        remove_metric_handler: Arc<RemoveMetricHandler>,
    ) -> Self {
        Self {
            create_handler,
            get_handler,
            list_handler,
            update_targets_handler,
            add_metric_handler,
            remove_metric_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/metric-sets - Create a metric set
pub async fn create_metric_set(
    State(handlers): State<MetricSetHandlers>,
    RequireUser(caller): RequireUser,
    Json(req): Json<CreateMetricSetRequest>,
) -> Response {
    let metrics: Result<Vec<MetricDefinition>, _> =
        req.metrics.into_iter().map(MetricDefinition::try_from).collect();
    let metrics = match metrics {
        Ok(metrics) => metrics,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(e.to_string())))
                .into_response()
        }
    };

    let cmd = CreateMetricSetCommand {
        name: req.name,
        description: req.description,
        metrics,
    };

    match handlers.create_handler.handle(cmd, caller.metadata()).await {
        Ok(set) => {
            let response: MetricSetResponse = set.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// GET /api/metric-sets - List the caller's metric sets
pub async fn list_metric_sets(
    State(handlers): State<MetricSetHandlers>,
    RequireUser(caller): RequireUser,
) -> Response {
    let query = ListMetricSetsQuery {
        user_id: caller.user_id,
    };

    match handlers.list_handler.handle(query).await {
        Ok(sets) => {
            let response: MetricSetListResponse = sets.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// GET /api/metric-sets/:id - Get a metric set
pub async fn get_metric_set(
    State(handlers): State<MetricSetHandlers>,
    RequireUser(caller): RequireUser,
    Path(metric_set_id): Path<String>,
) -> Response {
    let Ok(metric_set_id) = metric_set_id.parse::<MetricSetId>() else {
        return ErrorResponse::invalid_id("metric set");
    };

    let query = GetMetricSetQuery {
        metric_set_id,
        user_id: caller.user_id,
    };

    match handlers.get_handler.handle(query).await {
        Ok(set) => {
            let response: MetricSetResponse = set.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// PATCH /api/metric-sets/:id/targets - Change targets and rescore assessments
pub async fn update_targets(
    State(handlers): State<MetricSetHandlers>,
    RequireUser(caller): RequireUser,
    Path(metric_set_id): Path<String>,
    Json(req): Json<UpdateTargetsRequest>,
) -> Response {
    let Ok(metric_set_id) = metric_set_id.parse::<MetricSetId>() else {
        return ErrorResponse::invalid_id("metric set");
    };

    let changes: Result<Vec<TargetChange>, _> =
        req.changes.into_iter().map(TargetChange::try_from).collect();
    let changes = match changes {
        Ok(changes) => changes,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(e.to_string())))
                .into_response()
        }
    };

    let cmd = UpdateMetricTargetsCommand {
        metric_set_id,
        changes,
    };

    match handlers
        .update_targets_handler
        .handle(cmd, caller.metadata())
        .await
    {
        Ok(result) => {
            let response: UpdateTargetsResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// POST /api/metric-sets/:id/metrics - Add a metric and rescore assessments
pub async fn add_metric(
    State(handlers): State<MetricSetHandlers>,
    RequireUser(caller): RequireUser,
    Path(metric_set_id): Path<String>,
    Json(req): Json<MetricDefinitionRequest>,
) -> Response {
    let Ok(metric_set_id) = metric_set_id.parse::<MetricSetId>() else {
        return ErrorResponse::invalid_id("metric set");
    };
    let metric = match MetricDefinition::try_from(req) {
        Ok(metric) => metric,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(e.to_string())))
                .into_response()
        }
    };

    let cmd = AddMetricCommand {
        metric_set_id,
        metric,
    };

    match handlers.add_metric_handler.handle(cmd, caller.metadata()).await {
        Ok(result) => {
            let response: MetricSetRescoredResponse = result.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// DELETE /api/metric-sets/:id/metrics/:key - Remove a metric and rescore assessments
pub async fn remove_metric(
    State(handlers): State<MetricSetHandlers>,
    RequireUser(caller): RequireUser,
    Path((metric_set_id, key)): Path<(String, String)>,
) -> Response {
    let Ok(metric_set_id) = metric_set_id.parse::<MetricSetId>() else {
        return ErrorResponse::invalid_id("metric set");
    };
    let key = match MetricKey::new(key) {
        Ok(key) => key,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(e.to_string())))
                .into_response()
        }
    };

    let cmd = RemoveMetricCommand { metric_set_id, key };

    match handlers.remove_metric_handler.handle(cmd, caller.metadata()).await {
        Ok(result) => {
            let response: MetricSetRescoredResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}
