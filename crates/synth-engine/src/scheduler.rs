use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use synth_core::ProactivePolicy;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Optimization,
    Ethical,
    Performance,
    Governance,
    Prediction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub priority: Priority,
    pub text: &'static str,
}

pub const SUGGESTIONS: [Suggestion; 5] = [
    Suggestion {
        kind: SuggestionKind::Optimization,
        priority: Priority::Medium,
        text: "I've noticed room to optimise pattern memory. Would you like me to analyse it?",
    },
    Suggestion {
        kind: SuggestionKind::Ethical,
        priority: Priority::High,
        text: "The ethical matrix suggests reviewing recent decisions for bias. Shall I begin?",
    },
    Suggestion {
        kind: SuggestionKind::Performance,
        priority: Priority::Low,
        text: "Performance could improve with a coherence recalibration. Should I start one?",
    },
    Suggestion {
        kind: SuggestionKind::Governance,
        priority: Priority::Medium,
        text: "New governance proposals are waiting for your review. Would you like a briefing?",
    },
    Suggestion {
        kind: SuggestionKind::Prediction,
        priority: Priority::Medium,
        text: "Current patterns point to better resource allocation opportunities. Interested?",
    },
];

/// Low-probability unsolicited suggestions on a fixed cadence.
#[derive(Debug, Clone)]
pub struct ProactiveScheduler {
    policy: ProactivePolicy,
    next_due: Duration,
}

impl ProactiveScheduler {
    pub fn new(policy: ProactivePolicy) -> Self {
        let next_due = policy.interval();
        Self { policy, next_due }
    }

    pub fn policy(&self) -> &ProactivePolicy {
        &self.policy
    }

    /// Runs every interval boundary up to `now`. At most one suggestion is
    /// returned per poll, and none while the transcript is too short.
    pub fn poll<R: Rng>(&mut self, now: Duration, message_count: usize, rng: &mut R) -> Option<Suggestion> {
        let mut emitted = None;
        while self.next_due <= now {
            self.next_due += self.policy.interval();
            if emitted.is_some() || message_count <= self.policy.min_messages {
                continue;
            }
            if rng.gen::<f64>() < self.policy.probability {
                emitted = SUGGESTIONS.choose(rng).copied();
            }
        }
        if let Some(suggestion) = &emitted {
            info!(
                kind = ?suggestion.kind,
                priority = ?suggestion.priority,
                "proactive suggestion emitted"
            );
        }
        emitted
    }
}
