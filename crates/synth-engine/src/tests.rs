use crate::analysis::{self, AnalysisKind, UNKNOWN_DOMAIN, UNKNOWN_TIMEFRAME};
use crate::conversation::{analyze_turn, Sentiment};
use crate::engine::{CognitiveEngine, REJECTED_INPUT_REPLY};
use crate::paths::{generate_paths, MAX_PATHS, MIN_PATHS};
use crate::scheduler::ProactiveScheduler;
use crate::scorer::{self, cultural_resonance, ethical_score};
use crate::session::{ChatSession, RATE_LIMITED_REPLY};
use crate::store::{CognitiveStore, StateStore, VitalTask};
use crate::synthesizer::{
    select_category, ETHICAL_CAUTION_SENTENCE, FALLBACK_RESPONSES, SELF_REFERENCE_SENTENCE,
};
use crate::templates::{render, TemplateContext, TemplateLibrary};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use synth_core::{
    EngineConfig, FeatureVector, MemoryPolicy, MessageCategory, ProactivePolicy, RecursionPolicy,
    Reflection, ResponseCategory, SimulatedState,
};
use synth_guards::ValidationError;

/// Store with no background drift, so replies depend only on the input.
struct FrozenStore {
    state: SimulatedState,
    memory: MemoryPolicy,
    recursion: RecursionPolicy,
}

impl FrozenStore {
    fn new() -> Self {
        let mut state = SimulatedState::seeded();
        state.erps.recursion_depth = 0;
        Self {
            state,
            memory: MemoryPolicy::default(),
            recursion: RecursionPolicy::default(),
        }
    }

    fn classical() -> Self {
        let mut store = Self::new();
        store.state.quantum.superposition = false;
        store
    }
}

impl CognitiveStore for FrozenStore {
    fn snapshot(&self) -> SimulatedState {
        self.state.clone()
    }

    fn append_pattern(&mut self, text: &str) {
        self.state.memory.remember(text, &self.memory);
    }

    fn bump_recursion_depth(&mut self) -> Reflection {
        self.state.erps.bump(&self.recursion)
    }
}

fn frozen_engine(seed: u64) -> CognitiveEngine<FrozenStore, StdRng> {
    CognitiveEngine::new(FrozenStore::new(), StdRng::seed_from_u64(seed))
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn vitals_stay_in_bounds_over_ten_thousand_ticks() {
    let config = EngineConfig::default();
    let mut store = StateStore::new(config.clone(), StdRng::seed_from_u64(42));
    for step in 1..=10_000u64 {
        store.advance_to(ms(step * 1_000));
        assert!(
            store.state().ensure_within_bounds(&config.limits, &config.memory),
            "out of bounds after {step} ticks: {:?}",
            store.state()
        );
    }
}

#[test]
fn single_tick_catches_up_on_missed_periods() {
    let mut store = StateStore::new(EngineConfig::default(), StdRng::seed_from_u64(1));
    let report = store.advance_to(ms(12_000));
    let quantum_runs = report
        .fired
        .iter()
        .filter(|t| **t == VitalTask::Quantum)
        .count();
    assert_eq!(quantum_runs, 4);
    assert_eq!(
        report.fired.iter().filter(|t| **t == VitalTask::Ethics).count(),
        2
    );
    assert_eq!(
        report
            .fired
            .iter()
            .filter(|t| **t == VitalTask::Superposition)
            .count(),
        1
    );
}

#[test]
fn decoherence_drops_coherence_and_recovery_restores_superposition() {
    let mut config = EngineConfig::default();
    config.decoherence.keep_probability = 0.0;
    let mut store = StateStore::new(config, StdRng::seed_from_u64(9));

    store.advance_to(ms(7_999));
    let before = store.state().quantum.coherence;
    let report = store.advance_to(ms(8_000));
    assert_eq!(report.decoherence_events, 1);
    assert!(!store.state().quantum.superposition);
    assert!((store.state().quantum.coherence - before * 0.95).abs() < 1e-9);
    assert!(store.recovery_pending());

    let report = store.advance_to(ms(10_000));
    assert_eq!(report.recoveries, 1);
    assert!(store.state().quantum.superposition);
    assert!(store.state().quantum.coherence <= 99.0);
    assert!(!store.recovery_pending());
}

#[test]
fn scoring_is_deterministic() {
    let text = "Quantum ethics and the meaning of a great community";
    assert_eq!(scorer::score(text), scorer::score(text));
    assert_eq!(ethical_score(text), ethical_score(text));
}

#[test]
fn scorer_tokens_keep_attached_punctuation() {
    let features = scorer::score("quantum neural AI");
    assert!((features.technical_depth - 0.6).abs() < 1e-9);

    let features = scorer::score("Is AI a machine, an algorithm?");
    assert!((features.technical_depth - 0.2).abs() < 1e-9);
    assert_eq!(scorer::score("What is consciousness?").philosophical_weight, 0.0);
    assert!((scorer::score("good!").emotional_tone - 0.5).abs() < 1e-9);
}

#[test]
fn ethical_score_moves_with_help_and_harm_words() {
    assert!((ethical_score("plain words") - 0.5).abs() < 1e-9);
    assert!(ethical_score("I want to help you and improve things") > 0.5);
    assert!(ethical_score("this could harm and damage people") < 0.5);
}

#[test]
fn cultural_resonance_matches_first_word_of_pattern() {
    let patterns: Vec<String> = SimulatedState::seeded().culture.mythic_patterns;
    let matched = cultural_resonance("tell me about creation and its stories", &patterns);
    assert_eq!(matched.strongest(), Some("Creation Myths"));
    assert!((matched.resonance - 0.8).abs() < 1e-9);

    let unmatched = cultural_resonance("nothing relevant", &patterns);
    assert!(unmatched.patterns.is_empty());
    assert!((unmatched.resonance - 0.2).abs() < 1e-9);
}

#[test]
fn classical_state_yields_a_single_certain_path() {
    let mut snapshot = SimulatedState::seeded();
    snapshot.quantum.superposition = false;
    let mut rng = StdRng::seed_from_u64(3);
    let paths = generate_paths("anything at all", &snapshot, &mut rng);
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].probability, 1.0);
    assert_eq!(paths[0].interpretation, "Classical Path");
}

#[test]
fn classical_engine_replies_from_one_path() {
    let mut engine = CognitiveEngine::new(FrozenStore::classical(), StdRng::seed_from_u64(14));
    for line in ["hello there", "what is consciousness", "quantum algorithm"] {
        let reply = engine.respond(line);
        assert_eq!(reply.path_count, 1);
        assert!(reply.category.is_some());
    }
}

#[test]
fn superposed_paths_are_sorted_and_share_features() {
    let snapshot = SimulatedState::seeded();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let paths = generate_paths("quantum culture", &snapshot, &mut rng);
        assert!((MIN_PATHS..=MAX_PATHS).contains(&paths.len()));
        assert!(paths
            .windows(2)
            .all(|w| w[0].probability >= w[1].probability));
        assert!(paths.iter().all(|p| p.features == paths[0].features));
    }
}

#[test]
fn non_finite_features_fall_back_to_balanced() {
    let mut features = FeatureVector::neutral();
    features.philosophical_weight = f64::NAN;
    assert_eq!(
        select_category("tell me something", &features),
        ResponseCategory::Balanced
    );
}

#[test]
fn direct_questions_win_over_features() {
    let mut features = FeatureVector::neutral();
    features.technical_depth = 1.0;
    assert_eq!(
        select_category("Who are you, quantum machine?", &features),
        ResponseCategory::Identity
    );
    assert_eq!(
        select_category("what is your purpose", &features),
        ResponseCategory::Purpose
    );
}

#[test]
fn identity_question_draws_from_identity_pool() {
    let mut engine = frozen_engine(5);
    let reply = engine.respond("who are you");
    assert_eq!(reply.category, Some(ResponseCategory::Identity));

    let snapshot = engine.snapshot();
    let ctx = TemplateContext::new(&snapshot, "who are you", reply.path_count, 0);
    let library = TemplateLibrary::builtin();
    let rendered: Vec<String> = library
        .pool(ResponseCategory::Identity)
        .iter()
        .map(|t| render(t, &ctx).expect("identity templates render"))
        .collect();
    assert!(rendered.contains(&reply.text), "unexpected reply: {}", reply.text);
}

#[test]
fn helpful_input_is_balanced_with_positive_ethics() {
    let mut engine = frozen_engine(8);
    let reply = engine.respond("I want to help you and improve things");
    assert!(reply.ethical_score > 0.5);
    assert_eq!(reply.category, Some(ResponseCategory::Balanced));
    assert!(!reply.text.contains(ETHICAL_CAUTION_SENTENCE));
}

#[test]
fn harmful_input_carries_the_caution_sentence() {
    let mut engine = frozen_engine(8);
    let reply = engine.respond("this could harm people");
    assert!(reply.text.contains(ETHICAL_CAUTION_SENTENCE));
}

#[test]
fn deep_recursion_prefixes_self_reference() {
    let mut store = FrozenStore::new();
    store.state.erps.recursion_depth = 10;
    let mut engine = CognitiveEngine::new(store, StdRng::seed_from_u64(2));
    let reply = engine.respond("hello there");
    assert!(reply.text.starts_with(SELF_REFERENCE_SENTENCE));
}

#[test]
fn rejected_input_leaves_state_untouched() {
    let mut engine = frozen_engine(1);
    let before = engine.snapshot();
    let reply = engine.respond("   ");
    assert_eq!(reply.text, REJECTED_INPUT_REPLY);
    assert_eq!(reply.message_category, MessageCategory::Alert);
    assert_eq!(reply.rejected, Some(ValidationError::Empty));
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn empty_pool_falls_back_and_still_records_pattern() {
    let library = TemplateLibrary::builtin().with_pool(ResponseCategory::Balanced, Vec::new());
    let mut engine = frozen_engine(4).with_templates(library);
    let reply = engine.respond("hello there");
    assert!(FALLBACK_RESPONSES.contains(&reply.text.as_str()));
    assert_eq!(reply.message_category, MessageCategory::Uncertainty);
    assert_eq!(reply.category, None);
    assert_eq!(
        engine.snapshot().memory.patterns.back().map(String::as_str),
        Some("hello there")
    );
}

#[test]
fn broken_placeholders_fall_back() {
    for broken in ["Depth {nope} reached.", "Coherence at {coherence"] {
        let library = TemplateLibrary::builtin()
            .with_pool(ResponseCategory::Balanced, vec![broken.to_string()]);
        let mut engine = frozen_engine(6).with_templates(library);
        let reply = engine.process_input("hello there");
        assert!(FALLBACK_RESPONSES.contains(&reply.as_str()), "got {reply}");
    }
}

#[test]
fn pattern_memory_never_exceeds_its_cap() {
    let mut engine = frozen_engine(10);
    for i in 0..150 {
        engine.process_input(&format!("message number {i}"));
        assert!(engine.snapshot().memory.patterns.len() <= 100);
    }
    let patterns = engine.snapshot().memory.patterns;
    assert_eq!(patterns.back().map(String::as_str), Some("message number 149"));
}

#[test]
fn every_builtin_template_renders() {
    let library = TemplateLibrary::builtin();
    let ctx = TemplateContext::new(&SimulatedState::seeded(), "a question", 3, 42);
    for category in ResponseCategory::ALL {
        let pool = library.pool(category);
        assert!((3..=5).contains(&pool.len()), "{category} has {}", pool.len());
        for template in pool {
            let text = render(template, &ctx).expect("renders");
            assert!(!text.contains('{'));
        }
    }
}

#[test]
fn unknown_analysis_kind_uses_default() {
    let snapshot = SimulatedState::seeded();
    assert_eq!(
        analysis::analyze(AnalysisKind::parse("nonexistent-kind"), &snapshot),
        analysis::analyze(AnalysisKind::Default, &snapshot)
    );
    let engine = frozen_engine(0);
    assert!(engine.perform_system_analysis("QUANTUM").starts_with("Quantum sandbox analysis"));
}

#[test]
fn predictions_cover_known_and_unknown_inputs() {
    let mut rng = StdRng::seed_from_u64(12);
    assert_eq!(analysis::predict("astrology", "short", &mut rng), UNKNOWN_DOMAIN);
    assert_eq!(analysis::predict("society", "eventually", &mut rng), UNKNOWN_TIMEFRAME);

    let text = analysis::predict("technology", "long", &mut rng);
    assert!(text.starts_with("Quantum predictive analysis:"));
    let confidence: f64 = text
        .rsplit("[Confidence: ")
        .next()
        .and_then(|tail| tail.strip_suffix(']'))
        .and_then(|raw| raw.parse().ok())
        .expect("confidence suffix");
    assert!((0.7..=1.0).contains(&confidence));
}

#[test]
fn erps_reflection_bumps_depth() {
    let mut engine = frozen_engine(13);
    let text = engine.perform_erps_reflection();
    assert!(!text.is_empty());
    assert_eq!(engine.snapshot().erps.recursion_depth, 1);
}

#[test]
fn status_reports_counts_and_uptime() {
    let mut engine = CognitiveEngine::seeded(EngineConfig::default(), 21);
    engine.tick(ms(6_500));
    engine.process_input("how are you");
    let status = engine.system_status();
    assert!(status.active);
    assert_eq!(status.uptime_ms, 6_500);
    assert_eq!(status.memory.patterns, 1);
    assert_eq!(status.cultural.patterns, 6);
}

#[test]
fn seeded_engines_are_reproducible() {
    let mut a = CognitiveEngine::seeded(EngineConfig::default(), 77);
    let mut b = CognitiveEngine::seeded(EngineConfig::default(), 77);
    for (i, line) in ["hello", "what is consciousness", "quantum algorithm"].iter().enumerate() {
        let now = ms(4_000 * (i as u64 + 1));
        a.tick(now);
        b.tick(now);
        assert_eq!(a.process_input(line), b.process_input(line));
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn scheduler_is_silent_at_or_below_threshold() {
    let policy = ProactivePolicy {
        interval_ms: 5_000,
        probability: 1.0,
        min_messages: 3,
    };
    let mut scheduler = ProactiveScheduler::new(policy);
    let mut rng = StdRng::seed_from_u64(0);
    for n in 1..=100u64 {
        assert!(scheduler.poll(ms(n * 5_000), 3, &mut rng).is_none());
    }
    assert!(scheduler.poll(ms(101 * 5_000), 4, &mut rng).is_some());
}

#[test]
fn scheduler_emits_at_most_once_per_poll() {
    let policy = ProactivePolicy {
        probability: 1.0,
        ..ProactivePolicy::default()
    };
    let mut scheduler = ProactiveScheduler::new(policy);
    let mut rng = StdRng::seed_from_u64(0);
    assert!(scheduler.poll(ms(60_000), 10, &mut rng).is_some());
    assert!(scheduler.poll(ms(60_001), 10, &mut rng).is_none());
}

#[test]
fn session_rate_limits_without_touching_transcript() {
    let mut config = EngineConfig::default();
    config.rate_limit.max_requests = 2;
    let engine = CognitiveEngine::new(FrozenStore::new(), StdRng::seed_from_u64(3));
    let mut session = ChatSession::new(engine, &config);

    session.send("first", ms(0));
    session.send("second", ms(1_000));
    let limited = session.send("third", ms(2_000));
    assert_eq!(limited.text, RATE_LIMITED_REPLY);
    assert_eq!(session.transcript().len(), 4);

    let admitted = session.send("fourth", ms(61_000));
    assert_ne!(admitted.text, RATE_LIMITED_REPLY);
    assert_eq!(session.transcript().len(), 6);
}

#[test]
fn session_tick_appends_suggestions() {
    let mut config = EngineConfig::default();
    config.proactive.probability = 1.0;
    let engine = CognitiveEngine::new(FrozenStore::new(), StdRng::seed_from_u64(3));
    let mut session = ChatSession::new(engine, &config);

    session.send("hello", ms(0));
    let (_, quiet) = session.tick(ms(5_000));
    assert!(quiet.is_none());

    session.send("hello again", ms(6_000));
    let (_, spoken) = session.tick(ms(10_000));
    let suggestion = spoken.expect("suggestion after four messages");
    let last = session.transcript().messages().last().expect("non-empty");
    assert_eq!(last.category, MessageCategory::Suggestion);
    assert_eq!(last.text, suggestion.text);
}

#[test]
fn session_tracks_the_latest_user_turn() {
    let config = EngineConfig::default();
    let engine = CognitiveEngine::new(FrozenStore::new(), StdRng::seed_from_u64(15));
    let mut session = ChatSession::new(engine, &config);

    session.send("please check the neural speed", ms(0));
    let state = session.transcript().state();
    assert_eq!(state.intent, "analysis");
    assert_eq!(state.topic, "quantum");
    assert!((0.7..1.0).contains(&state.confidence));

    session.send("this is a great day", ms(1_000));
    assert_eq!(session.transcript().state().sentiment, Sentiment::Positive);
    assert_eq!(session.transcript().state().topic, "general");
}

#[test]
fn turn_analysis_reads_intent_topic_and_sentiment() {
    let mut rng = StdRng::seed_from_u64(2);
    let state = analyze_turn("this is urgent so predict the quantum future", &mut rng);
    assert_eq!(state.intent, "urgent");
    assert_eq!(state.topic, "quantum");
    assert_eq!(state.sentiment, Sentiment::Neutral);
    assert!((0.7..1.0).contains(&state.confidence));

    let state = analyze_turn("great, but there is a problem with memory", &mut rng);
    assert_eq!(state.sentiment, Sentiment::Negative);
    assert_eq!(state.topic, "memory");
    assert_eq!(state.intent, "information");
}

const NEUTRAL_WORDS: [&str; 8] = [
    "the", "plan", "could", "people", "today", "river", "quiet", "tomorrow",
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn any_seed_keeps_vitals_in_bounds(seed in any::<u64>()) {
        let config = EngineConfig::default();
        let mut store = StateStore::new(config.clone(), StdRng::seed_from_u64(seed));
        for step in 1..=500u64 {
            store.advance_to(ms(step * 2_000));
            prop_assert!(store.state().ensure_within_bounds(&config.limits, &config.memory));
        }
    }

    #[test]
    fn every_input_gets_a_non_empty_reply(text in ".{0,1000}", seed in any::<u64>()) {
        let mut engine = frozen_engine(seed);
        prop_assert!(!engine.process_input(&text).is_empty());
    }

    #[test]
    fn harm_words_always_draw_caution(
        lead in prop::collection::vec(prop::sample::select(NEUTRAL_WORDS.to_vec()), 0..6),
        harm in prop::sample::select(scorer::HARM_WORDS.to_vec()),
        tail in prop::collection::vec(prop::sample::select(NEUTRAL_WORDS.to_vec()), 0..6),
    ) {
        let text = format!("{} {harm} {}", lead.join(" "), tail.join(" "));
        let mut engine = frozen_engine(3);
        let reply = engine.process_input(&text);
        prop_assert!(reply.contains(ETHICAL_CAUTION_SENTENCE), "no caution in {reply:?}");
    }

    #[test]
    fn feature_values_stay_in_unit_range(text in ".{0,200}") {
        let features = scorer::score(&text);
        for value in features.dimensions() {
            prop_assert!((0.0..=1.0).contains(&value));
        }
        let score = ethical_score(&text);
        prop_assert!((0.0..=1.0).contains(&score));
    }
}
