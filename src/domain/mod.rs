//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `scoring` - The pure ScoreEngine and its value types
//! - `assessment` - Metric sets, site assessments and recalculation
//! - `territory` - Market rankings produced by an external scoring provider

pub mod assessment;
pub mod foundation;
pub mod scoring;
pub mod territory;
