use synth_core::ResponseCategory;
use thiserror::Error;

/// Failures inside response synthesis. None of these reach an engine
/// caller; they are logged and replaced by a fallback sentence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    #[error("template pool for {0} is empty")]
    EmptyPool(ResponseCategory),
    #[error("unknown template placeholder: {{{0}}}")]
    UnknownPlaceholder(String),
    #[error("unterminated placeholder in template: {0}")]
    MalformedTemplate(String),
    #[error("path generator returned no candidates")]
    NoCandidates,
}
