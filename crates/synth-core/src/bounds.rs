use serde::{Deserialize, Serialize};

/// Closed interval a simulated vital must stay inside.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const UNIT: Bounds = Bounds::new(0.0, 1.0);

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn is_valid(self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    /// One random-walk step: `current + (unit - 0.5) * step`, clamped.
    /// `unit` is expected in `[0, 1)`.
    pub fn walk(self, current: f64, unit: f64, step: f64) -> f64 {
        self.clamp(current + (unit - 0.5) * step)
    }
}
