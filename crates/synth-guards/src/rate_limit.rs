use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use synth_core::RateLimitPolicy;

/// Sliding-window submission counter keyed by caller identifier.
///
/// Time is passed in as an offset from any fixed epoch the caller picks,
/// so the window can be driven by a tick clock or by tests.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    requests: HashMap<String, VecDeque<Duration>>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            requests: HashMap::new(),
        }
    }

    pub fn from_policy(policy: &RateLimitPolicy) -> Self {
        Self::new(policy.max_requests, policy.window())
    }

    fn prune(window: Duration, history: &mut VecDeque<Duration>, now: Duration) {
        while let Some(oldest) = history.front() {
            if now.saturating_sub(*oldest) >= window {
                history.pop_front();
            } else {
                break;
            }
        }
    }

    /// Records the submission and returns true, or returns false when the
    /// window is already full.
    pub fn is_allowed(&mut self, identifier: &str, now: Duration) -> bool {
        let history = self.requests.entry(identifier.to_string()).or_default();
        Self::prune(self.window, history, now);
        if history.len() >= self.max_requests {
            return false;
        }
        history.push_back(now);
        true
    }

    pub fn remaining(&self, identifier: &str, now: Duration) -> usize {
        let used = self
            .requests
            .get(identifier)
            .map(|history| {
                history
                    .iter()
                    .filter(|t| now.saturating_sub(**t) < self.window)
                    .count()
            })
            .unwrap_or(0);
        self.max_requests.saturating_sub(used)
    }
}
