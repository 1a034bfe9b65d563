//! The facade every caller talks to.
//!
//! Each public entry point returns a usable value. Validation failures and
//! synthesis errors are turned into reply text here and never escape.

use crate::analysis::{self, AnalysisKind, SystemStatus};
use crate::paths::generate_paths;
use crate::store::{CognitiveStore, StateStore, TickReport};
use crate::synthesizer::{SynthesisRequest, Synthesizer, FALLBACK_RESPONSES};
use crate::templates::TemplateLibrary;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::Duration;
use synth_core::{EngineConfig, MessageCategory, ResponseCategory, SimulatedState};
use synth_guards::{validate, ValidationError};
use tracing::{debug, error, warn};

pub const REJECTED_INPUT_REPLY: &str =
    "Input validation failed. Please ensure your message is safe and appropriate.";

/// One assistant turn, with enough metadata for a caller to style it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub text: String,
    /// Pool the core sentence came from; `None` for rejections and fallbacks.
    pub category: Option<ResponseCategory>,
    pub message_category: MessageCategory,
    pub confidence: f64,
    pub ethical_score: f64,
    pub path_count: usize,
    pub rejected: Option<ValidationError>,
}

impl Reply {
    fn rejected(error: Option<ValidationError>) -> Self {
        Self {
            text: REJECTED_INPUT_REPLY.to_string(),
            category: None,
            message_category: MessageCategory::Alert,
            confidence: 0.0,
            ethical_score: 0.0,
            path_count: 0,
            rejected: error,
        }
    }
}

pub struct CognitiveEngine<S: CognitiveStore, R: Rng> {
    store: S,
    rng: R,
    synthesizer: Synthesizer,
    uptime: Duration,
}

impl<S: CognitiveStore, R: Rng> CognitiveEngine<S, R> {
    pub fn new(store: S, rng: R) -> Self {
        Self {
            store,
            rng,
            synthesizer: Synthesizer::default(),
            uptime: Duration::ZERO,
        }
    }

    pub fn with_templates(mut self, library: TemplateLibrary) -> Self {
        self.synthesizer = Synthesizer::new(library);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub(crate) fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Time of the last tick.
    pub fn uptime(&self) -> Duration {
        self.uptime
    }

    pub fn tick(&mut self, now: Duration) -> TickReport {
        self.uptime = self.uptime.max(now);
        self.store.tick(now)
    }

    pub fn snapshot(&self) -> SimulatedState {
        self.store.snapshot()
    }

    pub fn process_input(&mut self, text: &str) -> String {
        self.respond(text).text
    }

    pub fn respond(&mut self, text: &str) -> Reply {
        let validation = validate(text);
        if !validation.ok {
            warn!(error = ?validation.error, "input rejected");
            return Reply::rejected(validation.error);
        }
        let input = validation.sanitized;

        let reflection = self.store.bump_recursion_depth();
        let snapshot = self.store.snapshot();
        let paths = generate_paths(&input, &snapshot, &mut self.rng);
        debug!(
            paths = paths.len(),
            depth = reflection.depth,
            superposition = snapshot.quantum.superposition,
            "candidate paths generated"
        );

        let request = SynthesisRequest {
            text: &input,
            paths: &paths,
            snapshot: &snapshot,
            reflection,
            uptime_secs: self.uptime.as_secs(),
        };
        let reply = match self.synthesizer.synthesize(&request, &mut self.rng) {
            Ok(synthesis) => Reply {
                text: synthesis.text,
                category: Some(synthesis.category),
                message_category: MessageCategory::Normal,
                confidence: synthesis.confidence,
                ethical_score: synthesis.ethical_score,
                path_count: paths.len(),
                rejected: None,
            },
            Err(err) => {
                error!(error = %err, "synthesis failed, using fallback reply");
                let text = FALLBACK_RESPONSES
                    .choose(&mut self.rng)
                    .copied()
                    .unwrap_or(FALLBACK_RESPONSES[0]);
                Reply {
                    text: text.to_string(),
                    category: None,
                    message_category: MessageCategory::Uncertainty,
                    confidence: 0.0,
                    ethical_score: crate::scorer::ethical_score(&input),
                    path_count: paths.len(),
                    rejected: None,
                }
            }
        };

        self.store.append_pattern(&input);
        reply
    }

    pub fn system_status(&self) -> SystemStatus {
        let uptime_ms = u64::try_from(self.uptime.as_millis()).unwrap_or(u64::MAX);
        SystemStatus::from_snapshot(self.store.snapshot(), uptime_ms)
    }

    pub fn perform_system_analysis(&self, kind: &str) -> String {
        analysis::analyze(AnalysisKind::parse(kind), &self.store.snapshot())
    }

    pub fn perform_erps_reflection(&mut self) -> String {
        let reflection = self.store.bump_recursion_depth();
        analysis::reflect(reflection, &mut self.rng)
    }

    pub fn generate_prediction(&mut self, domain: &str, timeframe: &str) -> String {
        analysis::predict(domain, timeframe, &mut self.rng)
    }
}

pub type DefaultEngine = CognitiveEngine<StateStore<StdRng>, StdRng>;

impl CognitiveEngine<StateStore<StdRng>, StdRng> {
    /// Fully reproducible engine: the store and the pipeline get separate
    /// streams derived from `seed`.
    pub fn seeded(config: EngineConfig, seed: u64) -> Self {
        let store = StateStore::new(config, StdRng::seed_from_u64(seed));
        Self::new(store, StdRng::seed_from_u64(seed.wrapping_add(1)))
    }

    pub fn from_entropy(config: EngineConfig) -> Self {
        Self::new(
            StateStore::new(config, StdRng::from_entropy()),
            StdRng::from_entropy(),
        )
    }

    pub fn config(&self) -> &EngineConfig {
        self.store.config()
    }
}
