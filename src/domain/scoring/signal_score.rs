//! SignalScore value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// A normalized signal on the 0-100 scale.
///
/// Always finite and within `[0, 100]`. Unlike
/// [`Percentage`](crate::domain::foundation::Percentage) it may carry a
/// fractional part, since pre-scored dropdown values are passed through
/// unrounded.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SignalScore(f64);

impl SignalScore {
    /// The lowest possible signal.
    pub const MIN: Self = Self(0.0);

    /// The highest possible signal.
    pub const MAX: Self = Self(100.0);

    /// Clamps `value` into `[0, 100]`. `NaN` has no meaningful score.
    pub fn clamped(value: f64) -> Option<Self> {
        if value.is_nan() {
            return None;
        }
        Some(Self(value.clamp(0.0, 100.0)))
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for SignalScore {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(ValidationError::not_finite("signal_score"));
        }
        if !(0.0..=100.0).contains(&value) {
            return Err(ValidationError::out_of_range(
                "signal_score",
                0,
                100,
                value as i32,
            ));
        }
        Ok(Self(value))
    }
}

impl From<SignalScore> for f64 {
    fn from(score: SignalScore) -> Self {
        score.0
    }
}

impl fmt::Display for SignalScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{:.1}", self.0)
        }
    }
}
