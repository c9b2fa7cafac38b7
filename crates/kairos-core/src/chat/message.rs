//! Conversation message types.
//!
//! This module contains types for representing messages in a conversation,
//! including roles, identifiers and content.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from Kairos.
    Assistant,
}

/// Identifier of a chat message.
///
/// Messages loaded from the backend carry its integer row id, messages created
/// during the session carry a locally generated string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageId {
    Server(i64),
    Local(String),
}

impl MessageId {
    /// Generates a local identifier of the form `<prefix>-<unix millis>-<random>`.
    pub fn local(prefix: &str) -> Self {
        let millis = Utc::now().timestamp_millis();
        let suffix = Uuid::new_v4().simple().to_string();
        Self::Local(format!("{}-{}-{}", prefix, millis, &suffix[..9]))
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageId::Server(id) => write!(f, "{}", id),
            MessageId::Local(id) => f.write_str(id),
        }
    }
}

/// A single message in a conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MessageId>,
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub content: String,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
}

impl ChatMessage {
    /// Creates an optimistic user message stamped with the current time.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Some(MessageId::local("user")),
            role: MessageRole::User,
            content: content.into(),
            timestamp: now_iso(),
        }
    }

    /// Creates an assistant message carrying the server-supplied timestamp.
    pub fn assistant(content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id: Some(MessageId::local("ai")),
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Creates the synthetic assistant message shown when a send fails.
    pub fn connection_failure(error: &str) -> Self {
        Self {
            id: Some(MessageId::local("error")),
            role: MessageRole::Assistant,
            content: format!(
                "I'm sorry, I'm having trouble connecting right now. Error: {}. Please check if the backend server is running.",
                error
            ),
            timestamp: now_iso(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}

/// Current time as an RFC 3339 string with millisecond precision.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
