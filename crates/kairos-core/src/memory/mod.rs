//! Spellbook memories: facts the backend can weave into Kairos' replies.

pub mod model;

pub use model::{
    CreateMemoryRequest, DEFAULT_MEMORY_PRIORITY, Memory, MemoryListPayload, MemoryPayload,
};
