//! HTTP middleware for axum.
//!
//! - `caller` - Caller identity extractor

pub mod caller;

pub use caller::{Caller, CallerRejection, RequireUser, REQUEST_ID_HEADER, USER_ID_HEADER};
