pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod memory;
pub mod navigation;
pub mod stats;

// Re-export common types
pub use api::KairosApi;
pub use error::{KairosError, Result};
