use crate::scorer::tokenize;
use rand::Rng;
use serde::{Deserialize, Serialize};
use synth_core::{Message, MessageCategory, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// Coarse reading of the latest user turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationState {
    pub topic: &'static str,
    pub sentiment: Sentiment,
    pub intent: &'static str,
    pub confidence: f64,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self {
            topic: "general",
            sentiment: Sentiment::Neutral,
            intent: "information",
            confidence: 0.0,
        }
    }
}

// Checked in order; the first table with a hit wins.
const INTENTS: [(&str, &[&str]); 4] = [
    ("urgent", &["urgent", "critical", "emergency"]),
    ("prediction", &["predict", "forecast", "future"]),
    ("analysis", &["analyze", "check", "test", "diagnose"]),
    ("assistance", &["help", "assist", "support"]),
];

const TOPICS: [(&str, &[&str]); 4] = [
    ("quantum", &["quantum", "synapse", "neural"]),
    ("performance", &["performance", "system", "speed"]),
    ("memory", &["memory", "data", "storage"]),
    ("ethics", &["ethical", "bias", "moral"]),
];

const POSITIVE: [&str; 4] = ["good", "great", "excellent", "perfect"];
const NEGATIVE: [&str; 5] = ["bad", "terrible", "wrong", "error", "problem"];

fn classify(tokens: &[String], table: &[(&'static str, &[&str])], fallback: &'static str) -> &'static str {
    table
        .iter()
        .find(|(_, words)| tokens.iter().any(|t| words.contains(&t.as_str())))
        .map(|(label, _)| *label)
        .unwrap_or(fallback)
}

fn any_of(tokens: &[String], words: &[&str]) -> bool {
    tokens.iter().any(|t| words.contains(&t.as_str()))
}

pub fn analyze_turn<R: Rng>(text: &str, rng: &mut R) -> ConversationState {
    let tokens = tokenize(text);
    let sentiment = if any_of(&tokens, &NEGATIVE) {
        Sentiment::Negative
    } else if any_of(&tokens, &POSITIVE) {
        Sentiment::Positive
    } else {
        Sentiment::Neutral
    };
    ConversationState {
        topic: classify(&tokens, &TOPICS, "general"),
        sentiment,
        intent: classify(&tokens, &INTENTS, "information"),
        confidence: rng.gen_range(0.7..1.0),
    }
}

/// Ordered chat history plus the reading of the last user message.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    state: ConversationState,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn push_user<R: Rng>(&mut self, text: &str, rng: &mut R) -> &Message {
        self.state = analyze_turn(text, rng);
        self.push(Message::user(text))
    }

    pub fn push_assistant(&mut self, text: impl Into<String>, category: MessageCategory) -> &Message {
        self.push(Message::assistant(text, category))
    }

    fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn count_from(&self, sender: Sender) -> usize {
        self.messages.iter().filter(|m| m.sender == sender).count()
    }
}
