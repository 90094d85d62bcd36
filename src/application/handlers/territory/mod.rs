//! Territory scoring handlers.

mod get_territory_analysis;
mod list_territory_analyses;
mod score_territory;

pub use get_territory_analysis::{GetTerritoryAnalysisHandler, GetTerritoryAnalysisQuery};
pub use list_territory_analyses::{ListTerritoryAnalysesHandler, ListTerritoryAnalysesQuery};
pub use score_territory::{ScoreTerritoryCommand, ScoreTerritoryHandler, MAX_MARKETS_PER_REQUEST};
