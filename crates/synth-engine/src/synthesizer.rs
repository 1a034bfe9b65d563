use crate::error::SynthesisError;
use crate::scorer::{self, CulturalMatch};
use crate::templates::{render, TemplateContext, TemplateLibrary};
use rand::Rng;
use serde::Serialize;
use synth_core::{CandidatePath, FeatureVector, Reflection, ResponseCategory, SimulatedState};
use tracing::debug;

pub const SELF_REFERENCE_SENTENCE: &str = "I notice I'm reflecting on my own reflection here.";
pub const ETHICAL_CAUTION_SENTENCE: &str = "I must consider the ethical implications carefully.";

/// What callers see when synthesis fails internally.
pub const FALLBACK_RESPONSES: [&str; 3] = [
    "I'm having trouble forming a clear answer right now. Could you rephrase that?",
    "Something interrupted my train of thought. Let's try that again.",
    "My reasoning lost coherence for a moment. Please ask me once more.",
];

const IDENTITY_CUES: [&str; 6] = [
    "who are you",
    "yourself",
    "capabilities",
    "skills",
    "knowledge",
    "what can you",
];
const STATUS_CUES: [&str; 4] = ["status", "how are you", "systems", "running"];
const PURPOSE_CUES: [&str; 4] = ["purpose", "mission", "why", "goal"];

fn mentions(lower: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| lower.contains(cue))
}

/// Direct questions first, then the selected path's feature vector.
pub fn select_category(text: &str, features: &FeatureVector) -> ResponseCategory {
    let lower = text.to_lowercase();
    if mentions(&lower, &IDENTITY_CUES) {
        return ResponseCategory::Identity;
    }
    if mentions(&lower, &STATUS_CUES) {
        return ResponseCategory::Status;
    }
    if mentions(&lower, &PURPOSE_CUES) {
        return ResponseCategory::Purpose;
    }

    if features.dimensions().iter().any(|v| !v.is_finite()) {
        return ResponseCategory::Balanced;
    }
    if features.philosophical_weight > 0.5 {
        ResponseCategory::Philosophical
    } else if features.technical_depth > 0.5 {
        ResponseCategory::Technical
    } else if features.emotional_tone > 0.7 {
        ResponseCategory::Positive
    } else if features.emotional_tone < 0.3 {
        ResponseCategory::Empathic
    } else {
        ResponseCategory::Balanced
    }
}

pub fn confidence(top_probability: f64, ethical_score: f64, coherence: f64) -> f64 {
    let ethical_confidence = if ethical_score > 0.7 {
        0.9
    } else if ethical_score > 0.3 {
        0.7
    } else {
        0.4
    };
    let coherence_bonus = coherence / 100.0 * 0.1;
    ((top_probability + ethical_confidence + coherence_bonus) / 2.0).min(1.0)
}

/// Everything one synthesis call reads. The snapshot is taken once by the
/// caller and never re-read mid-call.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisRequest<'a> {
    pub text: &'a str,
    pub paths: &'a [CandidatePath],
    pub snapshot: &'a SimulatedState,
    pub reflection: Reflection,
    pub uptime_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Synthesis {
    pub text: String,
    pub category: ResponseCategory,
    pub ethical_score: f64,
    pub cultural: CulturalMatch,
    pub confidence: f64,
    pub self_reference: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    library: TemplateLibrary,
}

impl Synthesizer {
    pub fn new(library: TemplateLibrary) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &TemplateLibrary {
        &self.library
    }

    /// Only the first (highest-probability) path shapes the reply; the rest
    /// contribute nothing beyond the `{path_count}` placeholder.
    pub fn synthesize<R: Rng>(
        &self,
        request: &SynthesisRequest<'_>,
        rng: &mut R,
    ) -> Result<Synthesis, SynthesisError> {
        let selected = request.paths.first().ok_or(SynthesisError::NoCandidates)?;
        let category = select_category(request.text, &selected.features);
        let ethical_score = scorer::ethical_score(request.text);
        let cultural = scorer::cultural_resonance(
            request.text,
            &request.snapshot.culture.mythic_patterns,
        );

        let pool_len = self.library.pool(category).len();
        let draw = if pool_len == 0 { 0 } else { rng.gen_range(0..pool_len) };
        let template = self.library.pick(category, draw)?;
        let ctx = TemplateContext::new(
            request.snapshot,
            request.text,
            request.paths.len(),
            request.uptime_secs,
        );
        let core = render(template, &ctx)?;

        let mut parts: Vec<String> = Vec::with_capacity(4);
        if request.reflection.self_reference {
            parts.push(SELF_REFERENCE_SENTENCE.to_string());
        }
        if ethical_score < scorer::NEUTRAL_ETHICAL_SCORE {
            parts.push(ETHICAL_CAUTION_SENTENCE.to_string());
        }
        if let Some(pattern) = cultural.strongest() {
            parts.push(format!("This resonates with {pattern} patterns."));
        }
        parts.push(core);

        debug!(
            category = %category,
            draw,
            ethical_score,
            "synthesized reply from {} candidate paths",
            request.paths.len()
        );

        Ok(Synthesis {
            text: parts.join(" "),
            category,
            ethical_score,
            confidence: confidence(
                selected.probability,
                ethical_score,
                request.snapshot.quantum.coherence,
            ),
            cultural,
            self_reference: request.reflection.self_reference,
        })
    }
}
