//! HTTP adapter for metric set endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateMetricSetRequest, MetricDefinitionRequest, MetricSetListResponse,
    MetricSetRescoredResponse, MetricSetResponse, TargetChangeRequest,
    UpdateTargetsRequest, UpdateTargetsResponse,
};
pub use handlers::MetricSetHandlers;
pub use routes::metric_set_routes;
