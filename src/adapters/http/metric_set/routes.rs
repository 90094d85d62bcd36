//! HTTP routes for metric set endpoints.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use super::handlers::{
    add_metric, create_metric_set, get_metric_set, list_metric_sets, remove_metric,
    update_targets, MetricSetHandlers,
};

/// Creates the metric set router with all endpoints.
pub fn metric_set_routes(handlers: MetricSetHandlers) -> Router {
    Router::new()
        .route("/", post(create_metric_set).get(list_metric_sets))
        .route("/:id", get(get_metric_set))
        .route("/:id/targets", patch(update_targets))
        .route("/:id/metrics", post(add_metric))
        .route("/:id/metrics/:key", delete(remove_metric))
        .with_state(handlers)
}
