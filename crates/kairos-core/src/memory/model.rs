use serde::{Deserialize, Serialize};

/// Priority assigned to new memories when none is given.
pub const DEFAULT_MEMORY_PRIORITY: i32 = 5;

/// A spellbook memory stored by the backend.
///
/// The backend owns the lifecycle; the client only reads, creates and deletes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub memory_key: String,
    pub memory_value: String,
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

fn default_priority() -> i32 {
    DEFAULT_MEMORY_PRIORITY
}

/// Body of `POST /memories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMemoryRequest {
    pub memory_key: String,
    pub memory_value: String,
    pub priority: i32,
}

impl CreateMemoryRequest {
    pub fn new(memory_key: impl Into<String>, memory_value: impl Into<String>) -> Self {
        Self {
            memory_key: memory_key.into(),
            memory_value: memory_value.into(),
            priority: DEFAULT_MEMORY_PRIORITY,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl From<&Memory> for CreateMemoryRequest {
    fn from(memory: &Memory) -> Self {
        Self {
            memory_key: memory.memory_key.clone(),
            memory_value: memory.memory_value.clone(),
            priority: memory.priority,
        }
    }
}

/// Response of `GET /memories`: a bare array or `{"memories": [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MemoryListPayload {
    Bare(Vec<Memory>),
    Envelope {
        #[serde(default)]
        memories: Option<Vec<Memory>>,
    },
}

impl MemoryListPayload {
    /// Memories carried by the payload, or `None` when the envelope is empty.
    pub fn into_memories(self) -> Option<Vec<Memory>> {
        match self {
            MemoryListPayload::Bare(memories) => Some(memories),
            MemoryListPayload::Envelope { memories } => memories,
        }
    }
}

/// Response of `GET /memories/{id}`: a memory or `{"memory": {...}}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MemoryPayload {
    Bare(Memory),
    Envelope {
        #[serde(default)]
        memory: Option<Memory>,
    },
}

impl MemoryPayload {
    pub fn into_memory(self) -> Option<Memory> {
        match self {
            MemoryPayload::Bare(memory) => Some(memory),
            MemoryPayload::Envelope { memory } => memory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_defaults_priority() {
        let memory: Memory =
            serde_json::from_str(r#"{"memory_key": "tea", "memory_value": "green"}"#).unwrap();
        assert_eq!(memory.priority, DEFAULT_MEMORY_PRIORITY);
        assert!(memory.id.is_none());
    }

    #[test]
    fn create_request_from_memory() {
        let memory = Memory {
            id: Some(3),
            memory_key: "name".into(),
            memory_value: "Rebecca".into(),
            priority: 9,
            created_at: None,
            updated_at: None,
        };
        let request = CreateMemoryRequest::from(&memory);
        assert_eq!(request, CreateMemoryRequest::new("name", "Rebecca").with_priority(9));
    }

    #[test]
    fn list_payload_shapes() {
        let item = r#"{"id": 1, "memory_key": "k", "memory_value": "v", "priority": 2}"#;
        let bare: MemoryListPayload = serde_json::from_str(&format!("[{}]", item)).unwrap();
        assert_eq!(bare.into_memories().map(|m| m.len()), Some(1));

        let envelope: MemoryListPayload =
            serde_json::from_str(&format!(r#"{{"memories": [{}]}}"#, item)).unwrap();
        assert_eq!(envelope.into_memories().map(|m| m.len()), Some(1));

        let empty: MemoryListPayload = serde_json::from_str("{}").unwrap();
        assert!(empty.into_memories().is_none());
    }
}
