//! In-memory `KairosApi` used by the service and session tests.

use async_trait::async_trait;
use kairos_core::KairosApi;
use kairos_core::chat::{Acknowledgement, ChatMessage, ChatRequest, ChatResponse};
use kairos_core::memory::{CreateMemoryRequest, Memory};
use kairos_core::stats::DatabaseStats;
use kairos_core::{KairosError, Result};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

pub struct MockApi {
    pub chat_reply: Mutex<Result<Option<ChatResponse>>>,
    pub history: Mutex<Result<Option<Vec<ChatMessage>>>>,
    pub memories: Mutex<Vec<Memory>>,
    pub stats: Mutex<Option<DatabaseStats>>,
    pub chat_requests: Mutex<Vec<ChatRequest>>,
    pub history_limits: Mutex<Vec<Option<u32>>>,
    pub history_calls: AtomicUsize,
    /// When set, `chat` waits for a notification before answering.
    pub chat_gate: Option<Notify>,
    /// When set, `chat_history` waits for a notification before answering.
    pub history_gate: Option<Notify>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            chat_reply: Mutex::new(Ok(Some(reply("Hello from Kairos")))),
            history: Mutex::new(Ok(Some(Vec::new()))),
            memories: Mutex::new(Vec::new()),
            stats: Mutex::new(None),
            chat_requests: Mutex::new(Vec::new()),
            history_limits: Mutex::new(Vec::new()),
            history_calls: AtomicUsize::new(0),
            chat_gate: None,
            history_gate: None,
        }
    }

    pub fn gated() -> Self {
        Self {
            chat_gate: Some(Notify::new()),
            ..Self::new()
        }
    }

    pub fn history_gated() -> Self {
        Self {
            history_gate: Some(Notify::new()),
            ..Self::new()
        }
    }

    pub fn with_chat_reply(self, reply: Result<Option<ChatResponse>>) -> Self {
        *self.chat_reply.lock().unwrap() = reply;
        self
    }

    pub fn with_history(self, history: Result<Option<Vec<ChatMessage>>>) -> Self {
        *self.history.lock().unwrap() = history;
        self
    }

    pub fn release_chat(&self) {
        if let Some(gate) = &self.chat_gate {
            gate.notify_one();
        }
    }

    pub fn release_history(&self) {
        if let Some(gate) = &self.history_gate {
            gate.notify_one();
        }
    }
}

pub fn reply(text: &str) -> ChatResponse {
    ChatResponse {
        response: text.to_string(),
        relevant_memories: Vec::new(),
        timestamp: Some("2024-01-01T12:00:05Z".to_string()),
    }
}

pub fn memory(key: &str, value: &str) -> Memory {
    Memory {
        id: Some(1),
        memory_key: key.to_string(),
        memory_value: value.to_string(),
        priority: 5,
        created_at: None,
        updated_at: None,
    }
}

fn ack(message: &str) -> Option<Acknowledgement> {
    Some(Acknowledgement {
        message: Some(message.to_string()),
    })
}

#[async_trait]
impl KairosApi for MockApi {
    async fn chat(&self, request: &ChatRequest) -> Result<Option<ChatResponse>> {
        self.chat_requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.chat_gate {
            gate.notified().await;
        }
        self.chat_reply.lock().unwrap().clone()
    }

    async fn chat_history(&self, limit: Option<u32>) -> Result<Option<Vec<ChatMessage>>> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.history_limits.lock().unwrap().push(limit);
        if let Some(gate) = &self.history_gate {
            gate.notified().await;
        }
        self.history.lock().unwrap().clone()
    }

    async fn delete_chat_history(&self) -> Result<Option<Acknowledgement>> {
        Ok(ack("Chat history cleared successfully"))
    }

    async fn delete_chat_message(&self, id: &str) -> Result<Option<Acknowledgement>> {
        if id == "missing" {
            return Err(KairosError::http(404, "Chat message missing not found"));
        }
        Ok(ack("deleted"))
    }

    async fn memories(&self) -> Result<Option<Vec<Memory>>> {
        Ok(Some(self.memories.lock().unwrap().clone()))
    }

    async fn memory_by_id(&self, id: &str) -> Result<Option<Memory>> {
        Ok(self
            .memories
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.memory_key == id)
            .cloned())
    }

    async fn add_memory(&self, request: &CreateMemoryRequest) -> Result<Option<Acknowledgement>> {
        self.memories.lock().unwrap().push(Memory {
            id: None,
            memory_key: request.memory_key.clone(),
            memory_value: request.memory_value.clone(),
            priority: request.priority,
            created_at: None,
            updated_at: None,
        });
        Ok(ack("Memory added successfully"))
    }

    async fn delete_memory(&self, id: &str) -> Result<Option<Acknowledgement>> {
        let mut memories = self.memories.lock().unwrap();
        let before = memories.len();
        memories.retain(|m| m.memory_key != id);
        if memories.len() == before {
            return Ok(None);
        }
        Ok(ack("deleted"))
    }

    async fn delete_memories(&self) -> Result<Option<Acknowledgement>> {
        self.memories.lock().unwrap().clear();
        Ok(ack("All memories deleted"))
    }

    async fn stats(&self) -> Result<Option<DatabaseStats>> {
        Ok(self.stats.lock().unwrap().clone())
    }
}
