//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    // Metric set handlers
    AddMetricCommand, AddMetricHandler, CreateMetricSetCommand, CreateMetricSetHandler,
    GetMetricSetHandler, GetMetricSetQuery, ListMetricSetsHandler, ListMetricSetsQuery,
    MetricSetRescored, RemoveMetricCommand, RemoveMetricHandler, TargetChange, TargetEdit,
    UpdateMetricTargetsCommand, UpdateMetricTargetsHandler, UpdateMetricTargetsResult,
    // Assessment handlers
    AssessmentUpdate, AssessmentView, ClearMetricValueCommand, ClearMetricValueHandler,
    CreateAssessmentCommand, CreateAssessmentHandler, GetAssessmentHandler, GetAssessmentQuery,
    ListAssessmentsHandler, ListAssessmentsQuery, RateSiteVisitCommand, RateSiteVisitHandler,
    RecalculateAssessmentCommand, RecalculateAssessmentHandler, RecordMetricValueCommand,
    RecordMetricValueHandler,
    // Territory handlers
    GetTerritoryAnalysisHandler, GetTerritoryAnalysisQuery, ListTerritoryAnalysesHandler,
    ListTerritoryAnalysesQuery, ScoreTerritoryCommand, ScoreTerritoryHandler,
};
