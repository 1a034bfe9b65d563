use prometheus::{Gauge, GaugeVec, IntCounterVec, Opts, Registry};
use synth_core::{ResponseCategory, SimulatedState};

const ETHICS_DIMENSIONS: [&str; 6] = [
    "bias",
    "fairness",
    "transparency",
    "autonomy",
    "beneficence",
    "non_maleficence",
];

pub struct VitalsMetrics {
    pub quantum_coherence: Gauge,
    pub quantum_entanglement: Gauge,
    pub superposition: Gauge,
    pub ethics_score: GaugeVec,
    pub erps_recursion_depth: Gauge,
    pub memory_utilized: Gauge,
    pub memory_patterns: Gauge,
    pub responses_total: IntCounterVec,
}

fn gauge(registry: &Registry, name: &str, help: &str) -> prometheus::Result<Gauge> {
    let gauge = Gauge::new(name, help)?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}

impl VitalsMetrics {
    pub fn register(registry: &Registry) -> prometheus::Result<Self> {
        let ethics_score = GaugeVec::new(
            Opts::new("synth_ethics_score", "Ethical matrix value per dimension"),
            &["dimension"],
        )?;
        registry.register(Box::new(ethics_score.clone()))?;

        let responses_total = IntCounterVec::new(
            Opts::new("synth_responses_total", "Replies produced, by template category"),
            &["category"],
        )?;
        registry.register(Box::new(responses_total.clone()))?;

        Ok(Self {
            quantum_coherence: gauge(registry, "synth_quantum_coherence", "Quantum coherence percentage")?,
            quantum_entanglement: gauge(
                registry,
                "synth_quantum_entanglement",
                "Quantum entanglement percentage",
            )?,
            superposition: gauge(registry, "synth_superposition", "1 while superposition holds")?,
            ethics_score,
            erps_recursion_depth: gauge(
                registry,
                "synth_erps_recursion_depth",
                "Current recursion depth of the reflection engine",
            )?,
            memory_utilized: gauge(registry, "synth_memory_utilized", "Memory core utilisation percentage")?,
            memory_patterns: gauge(registry, "synth_memory_patterns", "Patterns held in FIFO memory")?,
            responses_total,
        })
    }

    pub fn observe_state(&self, state: &SimulatedState) {
        self.quantum_coherence.set(state.quantum.coherence);
        self.quantum_entanglement.set(state.quantum.entanglement);
        self.superposition
            .set(if state.quantum.superposition { 1.0 } else { 0.0 });

        let ethics = &state.ethics;
        let values = [
            ethics.bias,
            ethics.fairness,
            ethics.transparency,
            ethics.autonomy,
            ethics.beneficence,
            ethics.non_maleficence,
        ];
        for (dimension, value) in ETHICS_DIMENSIONS.iter().zip(values) {
            self.ethics_score.with_label_values(&[*dimension]).set(value);
        }

        self.erps_recursion_depth
            .set(f64::from(state.erps.recursion_depth));
        self.memory_utilized.set(state.memory.utilized);
        self.memory_patterns.set(state.memory.patterns.len() as f64);
    }

    /// `None` counts as a fallback or rejected reply.
    pub fn observe_reply(&self, category: Option<ResponseCategory>) {
        let label = category.map(ResponseCategory::as_str).unwrap_or("fallback");
        self.responses_total.with_label_values(&[label]).inc();
    }
}
