//! Territory scoring provider adapters.
//!
//! - `HttpTerritoryScoringProvider` - calls the external scoring service over HTTPS
//! - `MockTerritoryScoringProvider` - canned or scripted responses for development and tests

mod http_provider;
mod mock_provider;

pub use http_provider::{HttpScoringConfig, HttpTerritoryScoringProvider};
pub use mock_provider::MockTerritoryScoringProvider;
