//! HTTP adapter for site assessment endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AssessmentDetailResponse, AssessmentListResponse, AssessmentResponse,
    AssessmentUpdateResponse, CreateAssessmentRequest, ListAssessmentsParams, RateSiteVisitRequest,
    RecordMetricValueRequest,
};
pub use handlers::AssessmentHandlers;
pub use routes::assessment_routes;
