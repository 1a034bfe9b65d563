//! Input validation for chat text.
//!
//! Sanitization always runs, so a rejected input still comes back with a
//! cleaned, length-bounded `sanitized` string the caller may echo safely.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

pub const MAX_INPUT_CHARS: usize = 1000;

static JAVASCRIPT_PROTOCOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)javascript:").expect("static regex"));
static EVENT_HANDLER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)on\w+=").expect("static regex"));
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<script|javascript:|on\w+=").expect("static regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ValidationError {
    #[error("Input cannot be empty")]
    Empty,
    #[error("Input too long ({len} > {max} characters)")]
    TooLong { len: usize, max: usize },
    #[error("Invalid input detected")]
    DisallowedPattern,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Validation {
    pub ok: bool,
    pub sanitized: String,
    pub error: Option<ValidationError>,
}

impl Validation {
    fn accepted(sanitized: String) -> Self {
        Self {
            ok: true,
            sanitized,
            error: None,
        }
    }

    fn rejected(sanitized: String, error: ValidationError) -> Self {
        Self {
            ok: false,
            sanitized,
            error: Some(error),
        }
    }
}

fn strip_markup(input: &str) -> String {
    let no_brackets: String = input.trim().chars().filter(|c| *c != '<' && *c != '>').collect();
    let no_protocol = JAVASCRIPT_PROTOCOL.replace_all(&no_brackets, "");
    EVENT_HANDLER.replace_all(&no_protocol, "").into_owned()
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Strip angle brackets, `javascript:` and inline event handlers, then cut
/// to [`MAX_INPUT_CHARS`].
pub fn sanitize(input: &str) -> String {
    truncate_chars(&strip_markup(input), MAX_INPUT_CHARS)
}

pub fn validate(raw: &str) -> Validation {
    let stripped = strip_markup(raw);
    let len = stripped.chars().count();
    let sanitized = truncate_chars(&stripped, MAX_INPUT_CHARS);

    if sanitized.trim().is_empty() {
        return Validation::rejected(sanitized, ValidationError::Empty);
    }
    if len > MAX_INPUT_CHARS {
        return Validation::rejected(
            sanitized,
            ValidationError::TooLong {
                len,
                max: MAX_INPUT_CHARS,
            },
        );
    }

    let sanitized = sanitized.trim().to_string();
    // Stripping can splice a pattern back together, e.g. "javajavascript:script:".
    if DISALLOWED.is_match(&sanitized) {
        return Validation::rejected(sanitized, ValidationError::DisallowedPattern);
    }
    Validation::accepted(sanitized)
}
