use crate::VitalsMetrics;
use synth_core::{Bounds, SimulatedState};

/// Records `after` and reports whether coherence left `band` on the way
/// down, i.e. a decoherence event pushed it below the drift floor.
pub fn coherence_fell_below_band(
    metrics: &VitalsMetrics,
    band: Bounds,
    before: &SimulatedState,
    after: &SimulatedState,
) -> bool {
    metrics.observe_state(after);
    after.quantum.coherence < before.quantum.coherence && after.quantum.coherence < band.min
}
