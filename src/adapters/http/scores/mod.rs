//! HTTP adapter for the stateless ScoreEngine endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CompletionRequest, CompletionResponse, MetricScoreRequest, MetricScoreResponse,
    OverallScoreRequest, OverallScoreResponse,
};
pub use routes::score_routes;
