//! Chat operations: sending messages and managing history.

use kairos_core::chat::{Acknowledgement, ChatMessage, ChatRequest, ChatResponse};
use kairos_core::{KairosApi, Result};
use std::sync::Arc;

use crate::require;

/// Number of messages fetched by [`ChatService::get_recent_chat_history`] by default.
pub const DEFAULT_RECENT_COUNT: u32 = 10;

/// Thin adapter from chat use cases to the backend API.
#[derive(Clone)]
pub struct ChatService {
    api: Arc<dyn KairosApi>,
    history_limit: Option<u32>,
}

impl ChatService {
    pub fn new(api: Arc<dyn KairosApi>) -> Self {
        Self {
            api,
            history_limit: None,
        }
    }

    /// Sets the `limit` sent with full history loads.
    pub fn with_history_limit(mut self, limit: Option<u32>) -> Self {
        self.history_limit = limit;
        self
    }

    pub async fn send_message(&self, message: &str, include_memories: bool) -> Result<ChatResponse> {
        let request = ChatRequest {
            message: message.to_string(),
            include_memories,
        };
        let response = self.api.chat(&request).await?;
        require(response, "Failed to get a response from Kairos")
    }

    /// Loads the conversation history. An absent list is an empty history.
    pub async fn get_chat_history(&self) -> Result<Vec<ChatMessage>> {
        let history = self.api.chat_history(self.history_limit).await?;
        Ok(history.unwrap_or_default())
    }

    pub async fn get_recent_chat_history(&self, count: u32) -> Result<Vec<ChatMessage>> {
        let history = self.api.chat_history(Some(count)).await?;
        Ok(history.unwrap_or_default())
    }

    pub async fn delete_chat_history(&self) -> Result<Acknowledgement> {
        let ack = self.api.delete_chat_history().await?;
        require(ack, "Failed to delete chat history")
    }

    pub async fn delete_chat_message(&self, id: &str) -> Result<Acknowledgement> {
        let ack = self.api.delete_chat_message(id).await?;
        require(ack, "Failed to delete chat message")
    }
}
