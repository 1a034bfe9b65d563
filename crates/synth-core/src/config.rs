//! Engine configuration.
//!
//! Every constant the simulation runs on lives here with its default, so a
//! deployment can retune drift speed or memory caps from a JSON file without
//! touching the pipeline. Missing sections fall back to their defaults.

use crate::bounds::Bounds;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid bounds for {field}: [{min}, {max}]")]
    InvalidBounds { field: &'static str, min: f64, max: f64 },
    #[error("interval {0} must be non-zero")]
    ZeroInterval(&'static str),
    #[error("probability {field} out of [0,1]: {value}")]
    InvalidProbability { field: &'static str, value: f64 },
    #[error("memory policy keeps {retain} of {hard_cap} patterns")]
    InvalidMemoryPolicy { retain: usize, hard_cap: usize },
}

/// Periods of the self-update tasks, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TickIntervals {
    pub quantum_ms: u64,
    pub ethics_ms: u64,
    pub erps_ms: u64,
    pub superposition_ms: u64,
    pub memory_ms: u64,
    pub recovery_delay_ms: u64,
}

impl Default for TickIntervals {
    fn default() -> Self {
        Self {
            quantum_ms: 3_000,
            ethics_ms: 5_000,
            erps_ms: 4_000,
            superposition_ms: 8_000,
            memory_ms: 5_000,
            recovery_delay_ms: 2_000,
        }
    }
}

impl TickIntervals {
    pub fn quantum(&self) -> Duration {
        Duration::from_millis(self.quantum_ms)
    }

    pub fn ethics(&self) -> Duration {
        Duration::from_millis(self.ethics_ms)
    }

    pub fn erps(&self) -> Duration {
        Duration::from_millis(self.erps_ms)
    }

    pub fn superposition(&self) -> Duration {
        Duration::from_millis(self.superposition_ms)
    }

    pub fn memory(&self) -> Duration {
        Duration::from_millis(self.memory_ms)
    }

    pub fn recovery_delay(&self) -> Duration {
        Duration::from_millis(self.recovery_delay_ms)
    }
}

/// Bands the random walks are clamped into.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VitalLimits {
    pub coherence_drift: Bounds,
    pub entanglement: Bounds,
    pub bias: Bounds,
    pub ethics: Bounds,
    pub self_awareness: Bounds,
    pub metacognition: Bounds,
    pub memory_utilization: Bounds,
}

impl VitalLimits {
    /// Hard range for coherence. Decoherence may push it below the drift
    /// band but never out of this one.
    pub const COHERENCE_RANGE: Bounds = Bounds::new(0.0, 100.0);
}

impl Default for VitalLimits {
    fn default() -> Self {
        Self {
            coherence_drift: Bounds::new(90.0, 99.0),
            entanglement: Bounds::new(80.0, 95.0),
            bias: Bounds::new(0.01, 0.15),
            ethics: Bounds::new(95.0, 100.0),
            self_awareness: Bounds::new(0.2, 0.5),
            metacognition: Bounds::new(0.8, 1.0),
            memory_utilization: Bounds::new(60.0, 85.0),
        }
    }
}

/// Width of one random-walk step per vital; a step is `(u - 0.5) * width`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WalkSteps {
    pub coherence: f64,
    pub entanglement: f64,
    pub bias: f64,
    pub ethics: f64,
    pub self_awareness: f64,
    pub metacognition: f64,
    pub memory_utilization: f64,
}

impl Default for WalkSteps {
    fn default() -> Self {
        Self {
            coherence: 0.8,
            entanglement: 1.2,
            bias: 0.01,
            ethics: 0.3,
            self_awareness: 0.02,
            metacognition: 0.01,
            memory_utilization: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DecoherencePolicy {
    /// Chance that superposition survives a coin-flip tick.
    pub keep_probability: f64,
    pub decay_factor: f64,
    pub recovery_factor: f64,
}

impl Default for DecoherencePolicy {
    fn default() -> Self {
        Self {
            keep_probability: 0.7,
            decay_factor: 0.95,
            recovery_factor: 1.05,
        }
    }
}

/// FIFO pattern memory: once more than `hard_cap` entries accumulate, only
/// the most recent `retain` are kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MemoryPolicy {
    pub hard_cap: usize,
    pub retain: usize,
}

impl Default for MemoryPolicy {
    fn default() -> Self {
        Self {
            hard_cap: 100,
            retain: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecursionPolicy {
    pub self_reference_threshold: u32,
    pub ceiling: u32,
}

impl Default for RecursionPolicy {
    fn default() -> Self {
        Self {
            self_reference_threshold: 10,
            ceiling: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProactivePolicy {
    pub interval_ms: u64,
    pub probability: f64,
    /// Suggestions stay silent until the transcript holds more than this.
    pub min_messages: usize,
}

impl Default for ProactivePolicy {
    fn default() -> Self {
        Self {
            interval_ms: 5_000,
            probability: 0.1,
            min_messages: 3,
        }
    }
}

impl ProactivePolicy {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RateLimitPolicy {
    pub max_requests: usize,
    pub window_ms: u64,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_requests: 20,
            window_ms: 60_000,
        }
    }
}

impl RateLimitPolicy {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub intervals: TickIntervals,
    pub limits: VitalLimits,
    pub steps: WalkSteps,
    pub decoherence: DecoherencePolicy,
    pub memory: MemoryPolicy,
    pub recursion: RecursionPolicy,
    pub proactive: ProactivePolicy,
    pub rate_limit: RateLimitPolicy,
}

impl EngineConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.limits;
        for (field, bounds) in [
            ("coherence_drift", limits.coherence_drift),
            ("entanglement", limits.entanglement),
            ("bias", limits.bias),
            ("ethics", limits.ethics),
            ("self_awareness", limits.self_awareness),
            ("metacognition", limits.metacognition),
            ("memory_utilization", limits.memory_utilization),
        ] {
            if !bounds.is_valid() {
                return Err(ConfigError::InvalidBounds {
                    field,
                    min: bounds.min,
                    max: bounds.max,
                });
            }
        }
        let drift = limits.coherence_drift;
        if !VitalLimits::COHERENCE_RANGE.contains(drift.min)
            || !VitalLimits::COHERENCE_RANGE.contains(drift.max)
        {
            return Err(ConfigError::InvalidBounds {
                field: "coherence_drift",
                min: drift.min,
                max: drift.max,
            });
        }

        let intervals = &self.intervals;
        for (name, ms) in [
            ("quantum_ms", intervals.quantum_ms),
            ("ethics_ms", intervals.ethics_ms),
            ("erps_ms", intervals.erps_ms),
            ("superposition_ms", intervals.superposition_ms),
            ("memory_ms", intervals.memory_ms),
            ("proactive.interval_ms", self.proactive.interval_ms),
            ("rate_limit.window_ms", self.rate_limit.window_ms),
        ] {
            if ms == 0 {
                return Err(ConfigError::ZeroInterval(name));
            }
        }

        for (field, value) in [
            ("decoherence.keep_probability", self.decoherence.keep_probability),
            ("proactive.probability", self.proactive.probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { field, value });
            }
        }

        if self.memory.hard_cap == 0 || self.memory.retain > self.memory.hard_cap {
            return Err(ConfigError::InvalidMemoryPolicy {
                retain: self.memory.retain,
                hard_cap: self.memory.hard_cap,
            });
        }
        Ok(())
    }
}
