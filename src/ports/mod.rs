//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Repositories
//!
//! - `MetricSetRepository` - metric set persistence
//! - `AssessmentRepository` - site assessment persistence
//! - `TerritoryAnalysisRepository` - stored market rankings
//!
//! ## External services
//!
//! - `TerritoryScoringProvider` - ranks markets inside a territory
//! - `EventPublisher` - publishes domain events

mod assessment_repository;
mod event_publisher;
mod metric_set_repository;
mod territory_analysis_repository;
mod territory_scoring_provider;

pub use assessment_repository::AssessmentRepository;
pub use event_publisher::EventPublisher;
pub use metric_set_repository::MetricSetRepository;
pub use territory_analysis_repository::TerritoryAnalysisRepository;
pub use territory_scoring_provider::{
    ScoringProviderError, ScoringRequest, TerritoryScoringProvider, DEFAULT_MAX_MARKETS,
};
