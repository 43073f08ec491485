//! Conversation and wire message types
//!
//! `ConversationMessage` is the persisted per-turn record, owned by its
//! `Conversation` (one conversation per calendar day of activity).
//! `ChatMessage` is the role/content pair sent to the chat-completion API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::memory::DayStamp;

/// Who authored a persisted conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// One persisted chat turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
}

impl ConversationMessage {
    /// Create a message stamped with the current time
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self::new_at(text, sender, Utc::now())
    }

    /// Create a message with an explicit timestamp
    pub fn new_at(text: impl Into<String>, sender: Sender, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            timestamp,
            mood: None,
            topics: None,
        }
    }
}

/// One calendar day of conversation, created lazily on the first message
/// of a new day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    /// Calendar-day grouping key, computed once at creation
    pub day: DayStamp,
    pub messages: Vec<ConversationMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_topics: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotional_state: Option<String>,
}

impl Conversation {
    pub fn new_at(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: now,
            day: DayStamp::from_timestamp(now),
            messages: Vec::new(),
            summary: None,
            key_topics: None,
            emotional_state: None,
        }
    }
}

/// Role of a wire-level chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Wire message sent to the chat-completion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

impl From<&ConversationMessage> for ChatMessage {
    fn from(msg: &ConversationMessage) -> Self {
        match msg.sender {
            Sender::User => ChatMessage::user(msg.text.clone()),
            Sender::Ai => ChatMessage::assistant(msg.text.clone()),
        }
    }
}
