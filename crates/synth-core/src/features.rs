use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EthicalTag {
    Privacy,
    Autonomy,
    Fairness,
}

impl EthicalTag {
    pub fn label(self) -> &'static str {
        match self {
            EthicalTag::Privacy => "Privacy considerations",
            EthicalTag::Autonomy => "User autonomy respect",
            EthicalTag::Fairness => "Fairness and equity",
        }
    }
}

impl fmt::Display for EthicalTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-utterance scores, every dimension in `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    pub emotional_tone: f64,
    pub technical_depth: f64,
    pub philosophical_weight: f64,
    pub cultural_sensitivity: f64,
    pub ethical_implications: BTreeSet<EthicalTag>,
}

impl FeatureVector {
    pub fn neutral() -> Self {
        Self {
            emotional_tone: 0.5,
            technical_depth: 0.0,
            philosophical_weight: 0.0,
            cultural_sensitivity: 0.0,
            ethical_implications: BTreeSet::new(),
        }
    }

    pub fn dimensions(&self) -> [f64; 4] {
        [
            self.emotional_tone,
            self.technical_depth,
            self.philosophical_weight,
            self.cultural_sensitivity,
        ]
    }
}

/// One interpretation of an utterance. Lives for a single pipeline call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidatePath {
    pub interpretation: String,
    pub probability: f64,
    pub features: FeatureVector,
}
