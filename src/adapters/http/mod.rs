//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure; the
//! [`router`] module assembles them.

pub mod assessment;
pub mod error;
pub mod metric_set;
pub mod middleware;
pub mod router;
pub mod scores;
pub mod territory;

// Re-export key types for convenience
pub use error::ErrorResponse;
pub use router::{api_routes, build_router, AppState};
