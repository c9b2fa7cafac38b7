use kairos_core::chat::ChatMessage;

/// Observable state of a chat session.
///
/// `is_thinking` is only ever true while `is_sending` is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatSessionState {
    pub messages: Vec<ChatMessage>,
    /// History fetch in flight.
    pub is_loading: bool,
    /// Message round trip in flight.
    pub is_sending: bool,
    /// Kairos is composing a reply.
    pub is_thinking: bool,
    /// Last failure, shown until dismissed or replaced.
    pub error: Option<String>,
    pub include_memories: bool,
}

impl ChatSessionState {
    /// Whether `text` could be sent right now.
    pub fn can_send(&self, text: &str) -> bool {
        !text.trim().is_empty() && !self.is_sending
    }

    pub fn is_consistent(&self) -> bool {
        !self.is_thinking || self.is_sending
    }

    /// Whether the composer should accept input.
    pub fn is_busy(&self) -> bool {
        self.is_sending || self.is_thinking
    }
}
