//! Territory analysis repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Repository, TerritoryAnalysisId, UserId};
use crate::domain::territory::TerritoryAnalysis;

/// Repository port for TerritoryAnalysis persistence.
///
/// Analyses are written once and never updated; `update` exists only to
/// satisfy [`Repository`].
#[async_trait]
pub trait TerritoryAnalysisRepository: Repository<TerritoryAnalysis, TerritoryAnalysisId> {
    /// Find a user's analyses, newest first.
    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<TerritoryAnalysis>, DomainError>;
}
