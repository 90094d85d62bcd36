//! HTTP handlers for score endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::scoring::{MetricScoreInput, ScoreEngine, SignalScore};

use super::dto::{
    CompletionRequest, CompletionResponse, MetricScoreRequest, MetricScoreResponse,
    OverallScoreRequest, OverallScoreResponse,
};

/// POST /api/scores/metric - Score one metric
pub async fn score_metric(Json(req): Json<MetricScoreRequest>) -> Response {
    let input = MetricScoreInput::new(req.entered_value, req.target_value, req.higher_is_better);
    let score = ScoreEngine::metric_signal_score(&input, req.metric_identifier.as_deref());

    let response = MetricScoreResponse {
        signal_score: score.map(|s| s.value()),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// POST /api/scores/overall - Aggregate metric scores
pub async fn score_overall(Json(req): Json<OverallScoreRequest>) -> Response {
    let scores: Result<Vec<Option<SignalScore>>, _> = req
        .scores
        .into_iter()
        .map(|s| s.map(SignalScore::try_from).transpose())
        .collect();

    let scores = match scores {
        Ok(scores) => scores,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(e.to_string())))
                .into_response()
        }
    };

    let scored_count = scores.iter().flatten().count();
    let response = OverallScoreResponse {
        overall_signal_score: ScoreEngine::overall_signal_score(scores).map(|s| s.value()),
        scored_count,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// POST /api/scores/completion - Completion percentage
pub async fn score_completion(Json(req): Json<CompletionRequest>) -> Response {
    let response = CompletionResponse {
        completion_percentage: ScoreEngine::completion_percentage(
            req.total_items,
            req.completed_items,
        )
        .value(),
    };
    (StatusCode::OK, Json(response)).into_response()
}
