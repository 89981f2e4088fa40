use serde::{Deserialize, Serialize};

const UPPER_FACTOR: f64 = 1.75;
const LOWER_FACTOR: f64 = 0.25;

/// Acceptable band around an expected duration, ±75% of the expected value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlLimits {
    pub upper: f64,
    pub lower: f64,
}

impl ControlLimits {
    pub fn around(expected: f64) -> Self {
        Self {
            upper: expected * UPPER_FACTOR,
            lower: expected * LOWER_FACTOR,
        }
    }

    /// Values sitting exactly on a limit are in control.
    #[allow(clippy::cast_precision_loss)]
    pub fn is_out_of_control(&self, minutes: i64) -> bool {
        let value = minutes as f64;
        value > self.upper || value < self.lower
    }
}
