//! Backend API abstraction.
//!
//! Defines the interface the domain services talk to. The HTTP implementation
//! lives in `kairos-infrastructure`; tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::chat::{Acknowledgement, ChatMessage, ChatRequest, ChatResponse};
use crate::error::Result;
use crate::memory::{CreateMemoryRequest, Memory};
use crate::stats::DatabaseStats;

/// One method per backend endpoint.
///
/// Every call is a single attempt. `Ok(None)` means the backend answered
/// successfully but without a body; callers decide whether that is a failure.
#[async_trait]
pub trait KairosApi: Send + Sync {
    /// `POST /chat`
    async fn chat(&self, request: &ChatRequest) -> Result<Option<ChatResponse>>;

    /// `GET /chat-history?limit=N`
    async fn chat_history(&self, limit: Option<u32>) -> Result<Option<Vec<ChatMessage>>>;

    /// `DELETE /chat-history`
    async fn delete_chat_history(&self) -> Result<Option<Acknowledgement>>;

    /// `DELETE /chat-history/{id}`
    async fn delete_chat_message(&self, id: &str) -> Result<Option<Acknowledgement>>;

    /// `GET /memories`
    async fn memories(&self) -> Result<Option<Vec<Memory>>>;

    /// `GET /memories/{id}`
    async fn memory_by_id(&self, id: &str) -> Result<Option<Memory>>;

    /// `POST /memories`
    async fn add_memory(&self, request: &CreateMemoryRequest) -> Result<Option<Acknowledgement>>;

    /// `DELETE /memories/{id}`
    async fn delete_memory(&self, id: &str) -> Result<Option<Acknowledgement>>;

    /// `DELETE /memories`
    async fn delete_memories(&self) -> Result<Option<Acknowledgement>>;

    /// `GET /stats`
    async fn stats(&self) -> Result<Option<DatabaseStats>>;
}
