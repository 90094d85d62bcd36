use serde::{Deserialize, Serialize};

use crate::domain::foundation::Percentage;

/// A market score exactly as the scoring provider returned it.
///
/// Nothing here is trusted: names may be blank, scores may be out of range
/// or NaN, and the same market may appear twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMarketScore {
    pub market: String,
    pub score: f64,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

impl RawMarketScore {
    pub fn new(market: impl Into<String>, score: f64) -> Self {
        Self {
            market: market.into(),
            score,
            reasoning: String::new(),
            sources: Vec::new(),
        }
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.sources.push(source.into());
        self
    }

    /// Normalizes into a [`MarketScore`], or `None` when unusable.
    pub(crate) fn normalize(self) -> Option<MarketScore> {
        let market = self.market.trim();
        if market.is_empty() {
            return None;
        }
        let score = Percentage::from_f64_clamped(self.score)?;
        Some(MarketScore {
            market: market.to_string(),
            score,
            reasoning: self.reasoning.trim().to_string(),
            sources: self
                .sources
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }
}

/// A normalized, ranked market inside a territory analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketScore {
    pub market: String,
    pub score: Percentage,
    pub reasoning: String,
    pub sources: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_rounds() {
        let raw = RawMarketScore::new("  Boise, ID ", 71.6)
            .with_reasoning(" growing suburbs ")
            .with_source(" census.gov ")
            .with_source("   ");

        let market = raw.normalize().unwrap();

        assert_eq!(market.market, "Boise, ID");
        assert_eq!(market.score.value(), 72);
        assert_eq!(market.reasoning, "growing suburbs");
        assert_eq!(market.sources, vec!["census.gov".to_string()]);
    }

    #[test]
    fn normalize_clamps_out_of_range() {
        assert_eq!(RawMarketScore::new("A", 140.0).normalize().unwrap().score.value(), 100);
        assert_eq!(RawMarketScore::new("B", -3.0).normalize().unwrap().score.value(), 0);
    }

    #[test]
    fn normalize_drops_unusable_entries() {
        assert!(RawMarketScore::new("   ", 50.0).normalize().is_none());
        assert!(RawMarketScore::new("Reno, NV", f64::NAN).normalize().is_none());
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let raw: RawMarketScore =
            serde_json::from_str(r#"{"market":"Tulsa, OK","score":58}"#).unwrap();
        assert_eq!(raw.score, 58.0);
        assert!(raw.sources.is_empty());
    }
}
