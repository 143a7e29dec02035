use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who wrote a message. Stored as `user` / `bot`, the keys the widget has
/// always persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    #[serde(rename = "bot")]
    Agent,
}

/// One entry of the conversation transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub origin: Origin,
    pub text: String,
    #[serde(rename = "timestamp")]
    pub sent_at: DateTime<Utc>,
    #[serde(default)]
    pub feedback: Option<String>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Origin::User, text)
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Origin::Agent, text)
    }

    fn new(origin: Origin, text: impl Into<String>) -> Self {
        Self {
            origin,
            text: text.into(),
            sent_at: Utc::now(),
            feedback: None,
        }
    }
}

/// Screens of the support panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Chat,
    Faq,
}

/// Controller phase: `Busy` while a dispatch (or its queued continuation) runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Busy,
}

/// A canned question shown on the FAQ screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}
