//! HTTP routes for territory endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    get_territory_analysis, list_territory_analyses, score_territory, TerritoryHandlers,
};

pub fn territory_routes(handlers: TerritoryHandlers) -> Router {
    Router::new()
        .route("/", get(list_territory_analyses))
        .route("/score", post(score_territory))
        .route("/:id", get(get_territory_analysis))
        .with_state(handlers)
}
