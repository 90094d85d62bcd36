//! Site Signal - Site assessment scoring service
//!
//! Scores candidate retail and restaurant sites against configurable metric
//! targets, tracks site-visit observations, and ranks markets inside a
//! territory through an external scoring provider.
//!
//! The scoring rules live in [`domain::scoring::ScoreEngine`]; everything
//! else orchestrates, stores, and serves its results.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
