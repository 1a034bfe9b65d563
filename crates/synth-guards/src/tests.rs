use crate::rate_limit::RateLimiter;
use crate::validator::{sanitize, validate, ValidationError, MAX_INPUT_CHARS};
use proptest::prelude::*;
use std::time::Duration;
use synth_core::RateLimitPolicy;

#[test]
fn plain_text_passes_trimmed() {
    let result = validate("   who are you   ");
    assert!(result.ok);
    assert_eq!(result.sanitized, "who are you");
    assert!(result.error.is_none());
}

#[test]
fn blank_input_is_empty_error() {
    for raw in ["", "   ", "\n\t", "<>", "<<>>"] {
        let result = validate(raw);
        assert!(!result.ok, "{raw:?} should be rejected");
        assert_eq!(result.error, Some(ValidationError::Empty));
    }
}

#[test]
fn markup_is_stripped_before_checks() {
    let result = validate("<b>hello</b> onclick=alert(1) JavaScript:run");
    assert!(result.ok);
    assert_eq!(result.sanitized, "bhello/b alert(1) run");
}

#[test]
fn spliced_protocol_is_rejected() {
    let result = validate("javajavascript:script:alert(1)");
    assert!(!result.ok);
    assert_eq!(result.error, Some(ValidationError::DisallowedPattern));
    assert_eq!(result.sanitized, "javascript:alert(1)");
}

#[test]
fn overlong_input_fails_with_truncated_text() {
    let raw = "a".repeat(MAX_INPUT_CHARS + 25);
    let result = validate(&raw);
    assert!(!result.ok);
    assert_eq!(
        result.error,
        Some(ValidationError::TooLong {
            len: MAX_INPUT_CHARS + 25,
            max: MAX_INPUT_CHARS
        })
    );
    assert_eq!(result.sanitized.chars().count(), MAX_INPUT_CHARS);
}

#[test]
fn exactly_max_length_is_accepted() {
    let raw = "b".repeat(MAX_INPUT_CHARS);
    assert!(validate(&raw).ok);
}

#[test]
fn length_limit_applies_after_stripping_markup() {
    let raw = format!("{}{}", "<".repeat(20), "c".repeat(MAX_INPUT_CHARS - 10));
    assert_eq!(raw.chars().count(), MAX_INPUT_CHARS + 10);
    let result = validate(&raw);
    assert!(result.ok);
    assert_eq!(result.sanitized.chars().count(), MAX_INPUT_CHARS - 10);

    let raw = format!("{}{}", "<".repeat(20), "c".repeat(MAX_INPUT_CHARS + 1));
    assert_eq!(
        validate(&raw).error,
        Some(ValidationError::TooLong {
            len: MAX_INPUT_CHARS + 1,
            max: MAX_INPUT_CHARS
        })
    );
}

#[test]
fn truncation_respects_char_boundaries() {
    let raw = "é".repeat(MAX_INPUT_CHARS + 3);
    let cleaned = sanitize(&raw);
    assert_eq!(cleaned.chars().count(), MAX_INPUT_CHARS);
}

#[test]
fn rate_limiter_blocks_past_quota() {
    let mut limiter = RateLimiter::new(3, Duration::from_secs(60));
    let t0 = Duration::from_secs(100);
    for i in 0..3 {
        assert!(limiter.is_allowed("alice", t0 + Duration::from_secs(i)));
    }
    assert!(!limiter.is_allowed("alice", t0 + Duration::from_secs(5)));
    assert!(limiter.is_allowed("bob", t0 + Duration::from_secs(5)));
    assert_eq!(limiter.remaining("alice", t0 + Duration::from_secs(5)), 0);
}

#[test]
fn rate_limiter_window_slides() {
    let mut limiter = RateLimiter::from_policy(&RateLimitPolicy::default());
    let t0 = Duration::ZERO;
    for _ in 0..20 {
        assert!(limiter.is_allowed("ui", t0));
    }
    assert!(!limiter.is_allowed("ui", Duration::from_secs(59)));
    assert_eq!(limiter.remaining("ui", Duration::from_secs(60)), 20);
    assert!(limiter.is_allowed("ui", Duration::from_secs(60)));
    assert_eq!(limiter.remaining("ui", Duration::from_secs(60)), 19);
}

proptest! {
    #[test]
    fn inputs_over_limit_always_fail_and_truncate(extra in 1usize..400, ch in "[a-z]") {
        let raw = format!("x{}", ch.repeat(MAX_INPUT_CHARS + extra));
        let result = validate(&raw);
        prop_assert!(!result.ok);
        prop_assert!(result.sanitized.chars().count() <= MAX_INPUT_CHARS);
    }

    #[test]
    fn clean_inputs_within_limit_pass(text in "[a-zA-Z0-9 ,.?!']{1,200}") {
        prop_assume!(!text.trim().is_empty());
        let result = validate(&text);
        prop_assert!(result.ok);
        prop_assert_eq!(result.sanitized, text.trim());
    }
}
