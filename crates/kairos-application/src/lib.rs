pub mod chat_service;
pub mod memory_service;
pub mod session;
pub mod stats_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use chat_service::ChatService;
pub use memory_service::MemoryService;
pub use session::{ChatSession, ChatSessionState};
pub use stats_service::StatsService;

use kairos_core::{KairosError, Result};

/// Turns an absent backend result into a `MissingData` failure.
pub(crate) fn require<T>(value: Option<T>, failure: &str) -> Result<T> {
    value.ok_or_else(|| KairosError::missing_data(failure))
}
