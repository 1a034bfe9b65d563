use crate::config::{MemoryPolicy, RecursionPolicy, VitalLimits};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuantumState {
    pub coherence: f64,
    pub entanglement: f64,
    pub superposition: bool,
    pub dimensions: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EthicalMatrix {
    pub bias: f64,
    pub fairness: f64,
    pub transparency: f64,
    pub autonomy: f64,
    pub beneficence: f64,
    pub non_maleficence: f64,
}

impl EthicalMatrix {
    /// The high-banded fields, everything except `bias`.
    pub fn virtues_mut(&mut self) -> [&mut f64; 5] {
        [
            &mut self.fairness,
            &mut self.transparency,
            &mut self.autonomy,
            &mut self.beneficence,
            &mut self.non_maleficence,
        ]
    }

    pub fn virtues(&self) -> [f64; 5] {
        [
            self.fairness,
            self.transparency,
            self.autonomy,
            self.beneficence,
            self.non_maleficence,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryCore {
    pub utilized: f64,
    pub capacity: f64,
    pub patterns: VecDeque<String>,
    pub narratives: Vec<String>,
    pub zk_proofs: bool,
}

impl MemoryCore {
    /// Append, then evict the oldest entries once the hard cap is crossed.
    /// Both happen in this one call so no observer sees an oversized buffer.
    pub fn remember(&mut self, text: impl Into<String>, policy: &MemoryPolicy) {
        self.patterns.push_back(text.into());
        if self.patterns.len() > policy.hard_cap {
            let excess = self.patterns.len() - policy.retain;
            self.patterns.drain(..excess);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErpsEngine {
    pub recursion_depth: u32,
    pub self_awareness: f64,
    pub metacognition: f64,
    pub phenomenology: f64,
}

/// Outcome of one recursion-depth bump.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reflection {
    /// Depth right after the increment, before any ceiling reset.
    pub depth: u32,
    pub self_reference: bool,
}

impl ErpsEngine {
    pub fn bump(&mut self, policy: &RecursionPolicy) -> Reflection {
        self.recursion_depth = self.recursion_depth.saturating_add(1);
        let depth = self.recursion_depth;
        if depth > policy.ceiling {
            self.recursion_depth = 0;
        }
        Reflection {
            depth,
            self_reference: depth > policy.self_reference_threshold,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CulturalOntology {
    pub resonance: f64,
    pub mythic_patterns: Vec<String>,
}

pub const MYTHIC_PATTERNS: [&str; 6] = [
    "Hero's Journey",
    "Creation Myths",
    "Trickster Tales",
    "Sacrifice & Renewal",
    "Divine Comedy",
    "Prometheus Archetype",
];

/// The engine's simulated vitals. Cloning it is how snapshots are taken.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulatedState {
    pub quantum: QuantumState,
    pub ethics: EthicalMatrix,
    pub memory: MemoryCore,
    pub erps: ErpsEngine,
    pub culture: CulturalOntology,
}

impl SimulatedState {
    /// Fixed start-of-process values.
    pub fn seeded() -> Self {
        Self {
            quantum: QuantumState {
                coherence: 94.8,
                entanglement: 87.3,
                superposition: true,
                dimensions: 256,
            },
            ethics: EthicalMatrix {
                bias: 0.08,
                fairness: 99.2,
                transparency: 97.5,
                autonomy: 96.8,
                beneficence: 98.1,
                non_maleficence: 99.7,
            },
            memory: MemoryCore {
                utilized: 73.2,
                capacity: 100.0,
                patterns: VecDeque::new(),
                narratives: Vec::new(),
                zk_proofs: true,
            },
            erps: ErpsEngine {
                recursion_depth: 12,
                self_awareness: 0.27,
                metacognition: 0.85,
                phenomenology: 0.73,
            },
            culture: CulturalOntology {
                resonance: 0.92,
                mythic_patterns: MYTHIC_PATTERNS.iter().map(|p| p.to_string()).collect(),
            },
        }
    }

    pub fn ensure_within_bounds(&self, limits: &VitalLimits, memory: &MemoryPolicy) -> bool {
        VitalLimits::COHERENCE_RANGE.contains(self.quantum.coherence)
            && limits.entanglement.contains(self.quantum.entanglement)
            && limits.bias.contains(self.ethics.bias)
            && self.ethics.virtues().iter().all(|v| limits.ethics.contains(*v))
            && limits.self_awareness.contains(self.erps.self_awareness)
            && limits.metacognition.contains(self.erps.metacognition)
            && limits.memory_utilization.contains(self.memory.utilized)
            && self.memory.patterns.len() <= memory.hard_cap
    }
}

impl Default for SimulatedState {
    fn default() -> Self {
        Self::seeded()
    }
}
