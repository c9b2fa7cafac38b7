//! Wire payloads for the chat endpoints.

use serde::{Deserialize, Serialize};

use super::message::ChatMessage;

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub include_memories: bool,
}

/// Response of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    #[serde(default, alias = "relevant_memories")]
    pub relevant_memories: Vec<String>,
    /// Server timestamp; older backends omit it.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Response of `GET /chat-history`.
///
/// Accepts a bare array as well as the `{"history": [...]}` and
/// `{"data": [...]}` envelopes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HistoryPayload {
    Bare(Vec<ChatMessage>),
    Envelope {
        #[serde(default, alias = "data")]
        history: Option<Vec<ChatMessage>>,
    },
}

impl HistoryPayload {
    /// Messages carried by the payload; an envelope without a list is empty.
    pub fn into_messages(self) -> Vec<ChatMessage> {
        match self {
            HistoryPayload::Bare(messages) => messages,
            HistoryPayload::Envelope { history } => history.unwrap_or_default(),
        }
    }
}

/// Acknowledgement returned by mutating endpoints, e.g. `{"message": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: Option<String>,
}
