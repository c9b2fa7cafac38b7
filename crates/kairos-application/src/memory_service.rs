//! Memory operations for the spellbook.

use kairos_core::chat::Acknowledgement;
use kairos_core::memory::{CreateMemoryRequest, DEFAULT_MEMORY_PRIORITY, Memory};
use kairos_core::{KairosApi, Result};
use std::sync::Arc;

use crate::require;

#[derive(Clone)]
pub struct MemoryService {
    api: Arc<dyn KairosApi>,
    default_priority: i32,
}

impl MemoryService {
    pub fn new(api: Arc<dyn KairosApi>) -> Self {
        Self {
            api,
            default_priority: DEFAULT_MEMORY_PRIORITY,
        }
    }

    /// Sets the priority given to memories created by [`MemoryService::remember`].
    pub fn with_default_priority(mut self, priority: i32) -> Self {
        self.default_priority = priority;
        self
    }

    pub async fn get_memories(&self) -> Result<Vec<Memory>> {
        let memories = self.api.memories().await?;
        require(memories, "Failed to get memories")
    }

    pub async fn add_memory(&self, memory: &Memory) -> Result<Acknowledgement> {
        let request = CreateMemoryRequest::from(memory);
        let ack = self.api.add_memory(&request).await?;
        tracing::debug!("[MemoryService] Added memory '{}'", memory.memory_key);
        require(ack, "Failed to add memory")
    }

    /// Stores a new memory at the configured default priority.
    pub async fn remember(&self, key: &str, value: &str) -> Result<Acknowledgement> {
        let request = CreateMemoryRequest::new(key, value).with_priority(self.default_priority);
        let ack = self.api.add_memory(&request).await?;
        tracing::debug!(
            "[MemoryService] Remembered '{}' at priority {}",
            key,
            self.default_priority
        );
        require(ack, "Failed to add memory")
    }

    pub async fn delete_memory(&self, id: &str) -> Result<Acknowledgement> {
        let ack = self.api.delete_memory(id).await?;
        require(ack, "Failed to delete memory")
    }

    pub async fn get_memory_by_id(&self, id: &str) -> Result<Memory> {
        let memory = self.api.memory_by_id(id).await?;
        require(memory, "Failed to get memory by id")
    }

    pub async fn delete_memories(&self) -> Result<Acknowledgement> {
        let ack = self.api.delete_memories().await?;
        require(ack, "Failed to delete memories")
    }
}
