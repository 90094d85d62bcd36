//! HTTP DTOs for territory endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::territory::{MarketScore, TerritoryAnalysis};

/// Request to score a territory.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreTerritoryRequest {
    pub territory: String,
    #[serde(default)]
    pub criteria: Vec<String>,
    #[serde(default)]
    pub max_markets: Option<u32>,
}

/// Query parameters for listing analyses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTerritoryAnalysesParams {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Territory analysis view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct TerritoryAnalysisResponse {
    pub id: String,
    pub territory: String,
    pub criteria: Vec<String>,
    pub markets: Vec<MarketScore>,
    pub average_score: Option<u8>,
    pub created_at: String,
}

impl From<TerritoryAnalysis> for TerritoryAnalysisResponse {
    fn from(analysis: TerritoryAnalysis) -> Self {
        Self {
            id: analysis.id().to_string(),
            territory: analysis.territory().to_string(),
            criteria: analysis.criteria().to_vec(),
            average_score: analysis.average_score().map(|p| p.value()),
            markets: analysis.markets().to_vec(),
            created_at: analysis.created_at().to_rfc3339(),
        }
    }
}

/// The caller's analyses, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct TerritoryAnalysisListResponse {
    pub items: Vec<TerritoryAnalysisResponse>,
    pub total: usize,
}

impl From<Vec<TerritoryAnalysis>> for TerritoryAnalysisListResponse {
    fn from(analyses: Vec<TerritoryAnalysis>) -> Self {
        Self {
            total: analyses.len(),
            items: analyses.into_iter().map(Into::into).collect(),
        }
    }
}
