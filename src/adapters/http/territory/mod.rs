//! HTTP adapter for territory scoring endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ListTerritoryAnalysesParams, ScoreTerritoryRequest, TerritoryAnalysisListResponse,
    TerritoryAnalysisResponse,
};
pub use handlers::TerritoryHandlers;
pub use routes::territory_routes;
