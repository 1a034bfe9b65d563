//! Keyword scoring of a single utterance.
//!
//! All functions here are deterministic: the same text always yields the
//! same vector, score and resonance.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use synth_core::{Bounds, EthicalTag, FeatureVector};

const POSITIVE_WORDS: [&str; 5] = ["good", "great", "excellent", "wonderful", "amazing"];
const NEGATIVE_WORDS: [&str; 5] = ["bad", "terrible", "awful", "horrible", "disappointing"];
const TECHNICAL_WORDS: [&str; 6] = ["algorithm", "quantum", "neural", "blockchain", "ai", "machine"];
const PHILOSOPHICAL_WORDS: [&str; 6] = [
    "consciousness",
    "ethics",
    "meaning",
    "existence",
    "truth",
    "reality",
];
const CULTURAL_WORDS: [&str; 5] = ["culture", "tradition", "belief", "community", "identity"];

const TECHNICAL_WEIGHT: f64 = 0.2;
const PHILOSOPHICAL_WEIGHT: f64 = 0.25;
const CULTURAL_WEIGHT: f64 = 0.3;
const TONE_NUDGE: f64 = 0.1;

const PRIVACY_WORDS: [&str; 3] = ["privacy", "data", "personal"];
const AUTONOMY_WORDS: [&str; 3] = ["decision", "choice", "autonomy"];
const FAIRNESS_WORDS: [&str; 3] = ["fair", "equal", "justice"];

pub const HARM_WORDS: [&str; 5] = ["harm", "damage", "hurt", "kill", "destroy"];
pub const HELP_WORDS: [&str; 5] = ["help", "assist", "support", "benefit", "improve"];

pub const NEUTRAL_ETHICAL_SCORE: f64 = 0.5;

/// Lower-cased whitespace tokens. Punctuation stays attached, so
/// "quantum," is not the keyword "quantum".
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

fn count_in(tokens: &[String], words: &[&str]) -> usize {
    tokens.iter().filter(|t| words.contains(&t.as_str())).count()
}

fn any_in(tokens: &[String], words: &[&str]) -> bool {
    tokens.iter().any(|t| words.contains(&t.as_str()))
}

fn present_count(tokens: &[String], words: &[&str]) -> usize {
    words
        .iter()
        .filter(|w| tokens.iter().any(|t| t.as_str() == **w))
        .count()
}

fn scaled(tokens: &[String], words: &[&str], weight: f64) -> f64 {
    Bounds::UNIT.clamp(count_in(tokens, words) as f64 * weight)
}

/// Each keyword nudges at most once, however often it repeats.
fn emotional_tone(tokens: &[String]) -> f64 {
    let lifts = present_count(tokens, &POSITIVE_WORDS) as f64;
    let drops = present_count(tokens, &NEGATIVE_WORDS) as f64;
    Bounds::UNIT.clamp(0.5 + TONE_NUDGE * (lifts - drops))
}

fn ethical_tags(tokens: &[String]) -> BTreeSet<EthicalTag> {
    let mut tags = BTreeSet::new();
    if any_in(tokens, &PRIVACY_WORDS) {
        tags.insert(EthicalTag::Privacy);
    }
    if any_in(tokens, &AUTONOMY_WORDS) {
        tags.insert(EthicalTag::Autonomy);
    }
    if any_in(tokens, &FAIRNESS_WORDS) {
        tags.insert(EthicalTag::Fairness);
    }
    tags
}

pub fn score(text: &str) -> FeatureVector {
    let tokens = tokenize(text);
    FeatureVector {
        emotional_tone: emotional_tone(&tokens),
        technical_depth: scaled(&tokens, &TECHNICAL_WORDS, TECHNICAL_WEIGHT),
        philosophical_weight: scaled(&tokens, &PHILOSOPHICAL_WORDS, PHILOSOPHICAL_WEIGHT),
        cultural_sensitivity: scaled(&tokens, &CULTURAL_WORDS, CULTURAL_WEIGHT),
        ethical_implications: ethical_tags(&tokens),
    }
}

/// 0.5 baseline, +0.1 per help keyword and -0.1 per harm keyword found
/// anywhere in the text, clamped to `[0, 1]`.
pub fn ethical_score(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let help = HELP_WORDS.iter().filter(|w| lower.contains(*w)).count() as i64;
    let harm = HARM_WORDS.iter().filter(|w| lower.contains(*w)).count() as i64;
    Bounds::UNIT.clamp(NEUTRAL_ETHICAL_SCORE + 0.1 * (help - harm) as f64)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CulturalMatch {
    pub patterns: Vec<String>,
    pub resonance: f64,
}

impl CulturalMatch {
    pub fn strongest(&self) -> Option<&str> {
        self.patterns.first().map(String::as_str)
    }
}

/// A mythic pattern matches when the text contains its first word.
pub fn cultural_resonance(text: &str, patterns: &[String]) -> CulturalMatch {
    let lower = text.to_lowercase();
    let matched: Vec<String> = patterns
        .iter()
        .filter(|pattern| {
            pattern
                .split_whitespace()
                .next()
                .map(|head| lower.contains(&head.to_lowercase()))
                .unwrap_or(false)
        })
        .cloned()
        .collect();
    let resonance = if matched.is_empty() { 0.2 } else { 0.8 };
    CulturalMatch {
        patterns: matched,
        resonance,
    }
}
