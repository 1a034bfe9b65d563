use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// Display tag a UI can style on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageCategory {
    Normal,
    Suggestion,
    Analysis,
    Alert,
    Reflection,
    Uncertainty,
}

/// Which template pool a reply was drawn from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResponseCategory {
    Identity,
    Status,
    Purpose,
    Philosophical,
    Technical,
    Positive,
    Empathic,
    Balanced,
}

impl ResponseCategory {
    pub const ALL: [ResponseCategory; 8] = [
        ResponseCategory::Identity,
        ResponseCategory::Status,
        ResponseCategory::Purpose,
        ResponseCategory::Philosophical,
        ResponseCategory::Technical,
        ResponseCategory::Positive,
        ResponseCategory::Empathic,
        ResponseCategory::Balanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResponseCategory::Identity => "identity",
            ResponseCategory::Status => "status",
            ResponseCategory::Purpose => "purpose",
            ResponseCategory::Philosophical => "philosophical",
            ResponseCategory::Technical => "technical",
            ResponseCategory::Positive => "positive",
            ResponseCategory::Empathic => "empathic",
            ResponseCategory::Balanced => "balanced",
        }
    }
}

impl fmt::Display for ResponseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub category: MessageCategory,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>, category: MessageCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
            category,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text, MessageCategory::Normal)
    }

    pub fn assistant(text: impl Into<String>, category: MessageCategory) -> Self {
        Self::new(Sender::Assistant, text, category)
    }
}
