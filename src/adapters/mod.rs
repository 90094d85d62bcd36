//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - In-memory event bus
//! - `http` - axum REST API
//! - `memory` - In-memory repositories
//! - `postgres` - PostgreSQL repositories
//! - `territory` - Territory scoring providers (HTTP, mock)

pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod territory;

pub use events::InMemoryEventBus;
pub use memory::{
    InMemoryAssessmentRepository, InMemoryMetricSetRepository, InMemoryTerritoryAnalysisRepository,
};
pub use postgres::{
    PostgresAssessmentRepository, PostgresMetricSetRepository, PostgresTerritoryAnalysisRepository,
};
pub use territory::{HttpScoringConfig, HttpTerritoryScoringProvider, MockTerritoryScoringProvider};
