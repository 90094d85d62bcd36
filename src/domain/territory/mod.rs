//! Territory module - ranking candidate markets with an external scoring provider.

mod errors;
mod market_score;
mod territory_analysis;

pub use errors::TerritoryError;
pub use market_score::{MarketScore, RawMarketScore};
pub use territory_analysis::{TerritoryAnalysis, MAX_TERRITORY_LENGTH};
