//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod assessment;
pub mod metric_set;
pub mod territory;

pub use assessment::{
    AssessmentUpdate, AssessmentView, ClearMetricValueCommand, ClearMetricValueHandler,
    CreateAssessmentCommand, CreateAssessmentHandler, GetAssessmentHandler, GetAssessmentQuery,
    ListAssessmentsHandler, ListAssessmentsQuery, RateSiteVisitCommand, RateSiteVisitHandler,
    RecalculateAssessmentCommand, RecalculateAssessmentHandler, RecordMetricValueCommand,
    RecordMetricValueHandler,
};
pub use metric_set::{
    AddMetricCommand, AddMetricHandler, CreateMetricSetCommand, CreateMetricSetHandler,
    GetMetricSetHandler, GetMetricSetQuery, ListMetricSetsHandler, ListMetricSetsQuery,
    MetricSetRescored, RemoveMetricCommand, RemoveMetricHandler, TargetChange, TargetEdit,
    UpdateMetricTargetsCommand, UpdateMetricTargetsHandler, UpdateMetricTargetsResult,
};
pub use territory::{
    GetTerritoryAnalysisHandler, GetTerritoryAnalysisQuery, ListTerritoryAnalysesHandler,
    ListTerritoryAnalysesQuery, ScoreTerritoryCommand, ScoreTerritoryHandler,
    MAX_MARKETS_PER_REQUEST,
};
