//! HTTP handlers for territory endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{handle_territory_error, ErrorResponse};
use crate::adapters::http::middleware::RequireUser;
use crate::application::handlers::territory::{
    GetTerritoryAnalysisHandler, GetTerritoryAnalysisQuery, ListTerritoryAnalysesHandler,
    ListTerritoryAnalysesQuery, ScoreTerritoryCommand, ScoreTerritoryHandler,
};
use crate::domain::foundation::TerritoryAnalysisId;

use super::dto::{
    ListTerritoryAnalysesParams, ScoreTerritoryRequest, TerritoryAnalysisListResponse,
    TerritoryAnalysisResponse,
};

#[derive(Clone)]
pub struct TerritoryHandlers {
    score_handler: Arc<ScoreTerritoryHandler>,
    get_handler: Arc<GetTerritoryAnalysisHandler>,
    list_handler: Arc<ListTerritoryAnalysesHandler>,
}

impl TerritoryHandlers {
    pub fn new(
        score_handler: Arc<ScoreTerritoryHandler>,
        get_handler: Arc<GetTerritoryAnalysisHandler>,
        list_handler: Arc<ListTerritoryAnalysesHandler>,
    ) -> Self {
        Self {
            score_handler,
            get_handler,
            list_handler,
        }
    }
}

/// POST /api/territories/score - Rank markets in a territory
pub async fn score_territory(
    State(handlers): State<TerritoryHandlers>,
    RequireUser(caller): RequireUser,
    Json(req): Json<ScoreTerritoryRequest>,
) -> Response {
    let cmd = ScoreTerritoryCommand {
        territory: req.territory,
        criteria: req.criteria,
        max_markets: req.max_markets,
    };

    match handlers.score_handler.handle(cmd, caller.metadata()).await {
        Ok(analysis) => {
            let response: TerritoryAnalysisResponse = analysis.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_territory_error(e),
    }
}

/// GET /api/territories - List the caller's analyses
pub async fn list_territory_analyses(
    State(handlers): State<TerritoryHandlers>,
    RequireUser(caller): RequireUser,
    Query(params): Query<ListTerritoryAnalysesParams>,
) -> Response {
    let query = ListTerritoryAnalysesQuery {
        user_id: caller.user_id,
        limit: params.limit,
    };

    match handlers.list_handler.handle(query).await {
        Ok(analyses) => {
            let response: TerritoryAnalysisListResponse = analyses.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_territory_error(e),
    }
}

/// GET /api/territories/:id - Get a stored analysis
pub async fn get_territory_analysis(
    State(handlers): State<TerritoryHandlers>,
    RequireUser(caller): RequireUser,
    Path(analysis_id): Path<String>,
) -> Response {
    let Ok(analysis_id) = analysis_id.parse::<TerritoryAnalysisId>() else {
        return ErrorResponse::invalid_id("territory analysis");
    };

    let query = GetTerritoryAnalysisQuery {
        analysis_id,
        user_id: caller.user_id,
    };

    match handlers.get_handler.handle(query).await {
        Ok(analysis) => {
            let response: TerritoryAnalysisResponse = analysis.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_territory_error(e),
    }
}
