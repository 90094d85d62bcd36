//! Scoring Module - Pure signal and completion computations.
//!
//! Converts entered metric values and target values into normalized 0-100
//! signals, aggregates them into a site-level signal, and measures how much
//! of an assessment has been filled in.
//!
//! # Components
//!
//! - `ScoreEngine` - `metric_signal_score`, `overall_signal_score`, `completion_percentage`
//! - `SignalScore` - Finite 0-100 score value object
//! - `DropdownMetric` - Closed set of metrics whose entered value is already a score
//!
//! Everything here is stateless and free of I/O.

mod dropdown;
mod engine;
mod signal_score;

pub use dropdown::DropdownMetric;
pub use engine::{MetricScoreInput, ScoreEngine};
pub use signal_score::SignalScore;
