//! In-memory repository adapters.
//!
//! Used when no database is configured and throughout the test suite.
//! Data does not survive a restart.

mod assessment_repository;
mod metric_set_repository;
mod territory_analysis_repository;

pub use assessment_repository::InMemoryAssessmentRepository;
pub use metric_set_repository::InMemoryMetricSetRepository;
pub use territory_analysis_repository::InMemoryTerritoryAnalysisRepository;
