//! Chat domain: messages, wire payloads and display helpers.

pub mod format;
pub mod message;
pub mod request;

pub use format::format_timestamp;
pub use message::{ChatMessage, MessageId, MessageRole, now_iso};
pub use request::{Acknowledgement, ChatRequest, ChatResponse, HistoryPayload};
