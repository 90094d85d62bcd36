//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors, and event plumbing
//! that form the vocabulary of the site assessment domain.

mod command;
mod errors;
mod events;
mod ids;
mod percentage;
mod repository;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{DomainEvent, EventEnvelope, EventId, EventMetadata};
pub use ids::{AssessmentId, MetricSetId, TerritoryAnalysisId, UserId};
pub use percentage::Percentage;
pub use repository::Repository;
pub use timestamp::Timestamp;
