use crate::conversation::Transcript;
use crate::engine::{CognitiveEngine, Reply};
use crate::scheduler::{ProactiveScheduler, Suggestion};
use crate::store::{CognitiveStore, StateStore, TickReport};
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;
use synth_core::{EngineConfig, MessageCategory};
use synth_guards::RateLimiter;
use tracing::warn;

pub const RATE_LIMITED_REPLY: &str =
    "You're sending messages faster than I can reflect on them. Please wait a moment.";

const LOCAL_CLIENT: &str = "local";

pub type DefaultSession = ChatSession<StateStore<StdRng>, StdRng>;

/// A chat over one engine: transcript, per-client rate limit and the
/// proactive suggestion cadence.
pub struct ChatSession<S: CognitiveStore, R: Rng> {
    engine: CognitiveEngine<S, R>,
    transcript: Transcript,
    limiter: RateLimiter,
    scheduler: ProactiveScheduler,
}

impl<S: CognitiveStore, R: Rng> ChatSession<S, R> {
    pub fn new(engine: CognitiveEngine<S, R>, config: &EngineConfig) -> Self {
        Self {
            engine,
            transcript: Transcript::new(),
            limiter: RateLimiter::from_policy(&config.rate_limit),
            scheduler: ProactiveScheduler::new(config.proactive.clone()),
        }
    }

    pub fn engine(&self) -> &CognitiveEngine<S, R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut CognitiveEngine<S, R> {
        &mut self.engine
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Record a user line and the assistant's answer. Rate-limited lines
    /// are answered but never reach the engine or the transcript.
    pub fn send(&mut self, text: &str, now: Duration) -> Reply {
        if !self.limiter.is_allowed(LOCAL_CLIENT, now) {
            warn!("rate limit reached for {LOCAL_CLIENT}");
            return Reply {
                text: RATE_LIMITED_REPLY.to_string(),
                category: None,
                message_category: MessageCategory::Alert,
                confidence: 0.0,
                ethical_score: 0.0,
                path_count: 0,
                rejected: None,
            };
        }
        self.transcript.push_user(text, self.engine.rng_mut());
        let reply = self.engine.respond(text);
        self.transcript
            .push_assistant(reply.text.clone(), reply.message_category);
        reply
    }

    /// Record an out-of-band assistant message such as an analysis.
    pub fn note(&mut self, text: impl Into<String>, category: MessageCategory) {
        self.transcript.push_assistant(text, category);
    }

    /// Advance the engine, then give the scheduler its chance to speak.
    pub fn tick(&mut self, now: Duration) -> (TickReport, Option<Suggestion>) {
        let report = self.engine.tick(now);
        let suggestion = self
            .scheduler
            .poll(now, self.transcript.len(), self.engine.rng_mut());
        if let Some(suggestion) = &suggestion {
            self.transcript
                .push_assistant(suggestion.text, MessageCategory::Suggestion);
        }
        (report, suggestion)
    }

    pub fn remaining_requests(&self, now: Duration) -> usize {
        self.limiter.remaining(LOCAL_CLIENT, now)
    }
}
