//! Territory analysis aggregate - a stored ranking of candidate markets.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{MarketScore, RawMarketScore, TerritoryError};
use crate::domain::foundation::{
    Percentage, TerritoryAnalysisId, Timestamp, UserId, ValidationError,
};

/// Maximum length of the territory description.
pub const MAX_TERRITORY_LENGTH: usize = 500;

/// Territory analysis aggregate.
///
/// # Invariants
///
/// - `markets` is sorted by score descending, then by market name
/// - market names are unique ignoring case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerritoryAnalysis {
    id: TerritoryAnalysisId,
    owner: UserId,
    territory: String,
    criteria: Vec<String>,
    markets: Vec<MarketScore>,
    created_at: Timestamp,
}

impl TerritoryAnalysis {
    /// Builds an analysis from untrusted provider output.
    ///
    /// Entries with a blank market name or a NaN score are dropped, scores are
    /// rounded and clamped to 0-100, and repeated markets keep their first
    /// occurrence.
    pub fn from_provider(
        owner: UserId,
        territory: impl Into<String>,
        criteria: Vec<String>,
        raw: Vec<RawMarketScore>,
    ) -> Result<Self, TerritoryError> {
        let territory = territory.into().trim().to_string();
        Self::validate_territory(&territory)?;

        let mut seen = HashSet::new();
        let mut markets: Vec<MarketScore> = raw
            .into_iter()
            .filter_map(RawMarketScore::normalize)
            .filter(|m| seen.insert(m.market.to_lowercase()))
            .collect();
        markets.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.market.cmp(&b.market)));

        let criteria = criteria
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        Ok(Self {
            id: TerritoryAnalysisId::new(),
            owner,
            territory,
            criteria,
            markets,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute an analysis from persistence (no validation).
    pub fn reconstitute(
        id: TerritoryAnalysisId,
        owner: UserId,
        territory: String,
        criteria: Vec<String>,
        markets: Vec<MarketScore>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner,
            territory,
            criteria,
            markets,
            created_at,
        }
    }

    pub fn id(&self) -> TerritoryAnalysisId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn territory(&self) -> &str {
        &self.territory
    }

    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    pub fn markets(&self) -> &[MarketScore] {
        &self.markets
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }

    /// Rounded mean market score; `None` when no market survived normalization.
    pub fn average_score(&self) -> Option<Percentage> {
        if self.markets.is_empty() {
            return None;
        }
        let sum: u32 = self.markets.iter().map(|m| u32::from(m.score.value())).sum();
        Percentage::from_f64_clamped(f64::from(sum) / self.markets.len() as f64)
    }

    /// Keeps only the `n` best markets.
    pub fn keep_top(&mut self, n: usize) {
        self.markets.truncate(n);
    }

    fn validate_territory(territory: &str) -> Result<(), ValidationError> {
        if territory.is_empty() {
            return Err(ValidationError::empty_field("territory"));
        }
        let len = territory.chars().count();
        if len > MAX_TERRITORY_LENGTH {
            return Err(ValidationError::out_of_range(
                "territory",
                1,
                MAX_TERRITORY_LENGTH as i32,
                len as i32,
            ));
        }
        Ok(())
    }
}
