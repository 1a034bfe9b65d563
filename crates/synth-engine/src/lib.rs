//! Cognitive pipeline: simulated vitals, utterance scoring, candidate
//! paths, templated synthesis and the read-only analysis surface.

pub mod analysis;
pub mod conversation;
pub mod engine;
pub mod error;
pub mod paths;
pub mod scheduler;
pub mod scorer;
pub mod session;
pub mod store;
pub mod synthesizer;
pub mod templates;
#[cfg(test)]
mod tests;

pub use analysis::{AnalysisKind, SystemStatus};
pub use conversation::{ConversationState, Sentiment, Transcript};
pub use engine::{CognitiveEngine, DefaultEngine, Reply};
pub use error::SynthesisError;
pub use scheduler::{Priority, ProactiveScheduler, Suggestion, SuggestionKind};
pub use session::{ChatSession, DefaultSession};
pub use store::{CognitiveStore, StateStore, TickReport, VitalTask};
pub use synthesizer::{Synthesis, SynthesisRequest, Synthesizer};
pub use templates::{TemplateContext, TemplateLibrary};
