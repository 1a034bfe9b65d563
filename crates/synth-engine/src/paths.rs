use crate::scorer;
use rand::Rng;
use synth_core::{CandidatePath, SimulatedState};

pub const MIN_PATHS: usize = 2;
pub const MAX_PATHS: usize = 4;

/// Candidate interpretations of `text`, highest probability first.
///
/// In superposition every candidate shares one feature vector and only
/// the probability weight is drawn per candidate. Otherwise a single
/// classical path with probability 1.0 is returned. Never empty.
pub fn generate_paths<R: Rng>(
    text: &str,
    snapshot: &SimulatedState,
    rng: &mut R,
) -> Vec<CandidatePath> {
    let features = scorer::score(text);

    if !snapshot.quantum.superposition {
        return vec![CandidatePath {
            interpretation: "Classical Path".into(),
            probability: 1.0,
            features,
        }];
    }

    let count = rng.gen_range(MIN_PATHS..=MAX_PATHS);
    let mut paths: Vec<CandidatePath> = (1..=count)
        .map(|n| CandidatePath {
            interpretation: format!("Path {n}"),
            probability: rng.gen::<f64>(),
            features: features.clone(),
        })
        .collect();
    // sort_by is stable, so equal weights keep generation order.
    paths.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    paths
}
