//! HTTP routes for score endpoints.

use axum::{routing::post, Router};

use super::handlers::{score_completion, score_metric, score_overall};

/// Creates the score router. These endpoints hold no state and need no caller.
pub fn score_routes() -> Router {
    Router::new()
        .route("/metric", post(score_metric))
        .route("/overall", post(score_overall))
        .route("/completion", post(score_completion))
}
