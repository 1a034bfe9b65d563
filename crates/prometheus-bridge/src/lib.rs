//! Prometheus export of the engine's simulated vitals.

pub mod guards;
pub mod metrics;

pub use guards::coherence_fell_below_band;
pub use metrics::VitalsMetrics;

use prometheus::{Encoder, Registry, TextEncoder};

/// Text exposition of everything registered on `registry`.
pub fn render(registry: &Registry) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buf)?;
    Ok(String::from_utf8(buf)?)
}
