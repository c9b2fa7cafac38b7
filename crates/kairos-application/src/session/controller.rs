//! Chat session controller.
//!
//! Sequences a send as: optimistic user message, Sending, Thinking, backend
//! round trip, assistant reply (or a synthetic failure reply), Idle. Errors are
//! an overlay on top of these states rather than a state of their own.
//!
//! State lives in a `watch` channel so views can subscribe to snapshots while
//! actions mutate it in place.

use kairos_core::chat::{ChatMessage, now_iso};
use kairos_core::{KairosError, Result};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::state::ChatSessionState;
use crate::chat_service::ChatService;

/// Owns the state of one chat session, from mount to unmount.
pub struct ChatSession {
    chat: ChatService,
    state: watch::Sender<ChatSessionState>,
    mounted: AtomicBool,
    cancel: CancellationToken,
}

/// Resets flags when dropped, so an abandoned action never leaves the
/// session stuck in Sending or Loading.
struct FlagReset<'a> {
    state: &'a watch::Sender<ChatSessionState>,
    reset: fn(&mut ChatSessionState),
}

impl Drop for FlagReset<'_> {
    fn drop(&mut self) {
        self.state.send_modify(self.reset);
    }
}

impl ChatSession {
    pub fn new(chat: ChatService) -> Self {
        let (state, _) = watch::channel(ChatSessionState::default());
        Self {
            chat,
            state,
            mounted: AtomicBool::new(false),
            cancel: CancellationToken::new(),
        }
    }

    /// Subscribes to state snapshots.
    pub fn subscribe(&self) -> watch::Receiver<ChatSessionState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ChatSessionState {
        self.state.borrow().clone()
    }

    pub fn can_send(&self, text: &str) -> bool {
        self.state.borrow().can_send(text)
    }

    pub fn clear_error(&self) {
        self.state.send_if_modified(|state| state.error.take().is_some());
    }

    pub fn set_include_memories(&self, include: bool) {
        self.state.send_if_modified(|state| {
            let changed = state.include_memories != include;
            state.include_memories = include;
            changed
        });
    }

    /// Flips the memory toggle and returns the new value.
    pub fn toggle_include_memories(&self) -> bool {
        let mut include = false;
        self.state.send_modify(|state| {
            state.include_memories = !state.include_memories;
            include = state.include_memories;
        });
        include
    }

    /// Performs the initial history load. Only the first call loads; returns
    /// whether this call did.
    pub async fn mount(&self) -> bool {
        if self.mounted.swap(true, Ordering::SeqCst) {
            return false;
        }
        tracing::info!("[ChatSession] Mounted, loading chat history");
        self.load_chat_history().await;
        true
    }

    /// Ends the session, aborting any request still in flight.
    pub fn unmount(&self) {
        tracing::info!("[ChatSession] Unmounted");
        self.cancel.cancel();
    }

    /// Sends a message to Kairos.
    ///
    /// Does nothing for blank text or while another send is in flight.
    pub async fn send_message(&self, text: &str) {
        let content = text.trim();
        if content.is_empty() {
            return;
        }

        let mut include_memories = false;
        let claimed = self.state.send_if_modified(|state| {
            if state.is_sending {
                return false;
            }
            state.is_sending = true;
            state.is_thinking = false;
            state.error = None;
            state.messages.push(ChatMessage::user(content));
            include_memories = state.include_memories;
            true
        });
        if !claimed {
            tracing::debug!("[ChatSession] Send ignored, another message is in flight");
            return;
        }

        let _reset = FlagReset {
            state: &self.state,
            reset: |state| {
                state.is_sending = false;
                state.is_thinking = false;
            },
        };

        self.state.send_modify(|state| state.is_thinking = true);

        let result = self
            .until_unmounted(self.chat.send_message(content, include_memories))
            .await;

        self.state.send_modify(|state| match result {
            Ok(response) => {
                let timestamp = response.timestamp.unwrap_or_else(now_iso);
                state
                    .messages
                    .push(ChatMessage::assistant(response.response, timestamp));
            }
            Err(err) => {
                if err.is_cancelled() {
                    tracing::info!("[ChatSession] Send abandoned, session unmounted");
                } else {
                    tracing::warn!("[ChatSession] Chat error: {}", err);
                }
                let message = err.to_string();
                state.messages.push(ChatMessage::connection_failure(&message));
                state.error = Some(message);
            }
        });
    }

    /// Replaces the message list with the backend's history.
    pub async fn load_chat_history(&self) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });
        let _reset = FlagReset {
            state: &self.state,
            reset: |state| state.is_loading = false,
        };

        match self.until_unmounted(self.chat.get_chat_history()).await {
            Ok(messages) => {
                tracing::debug!("[ChatSession] Loaded {} history messages", messages.len());
                self.state.send_modify(|state| state.messages = messages);
            }
            Err(err) => {
                if err.is_cancelled() {
                    tracing::info!("[ChatSession] History load abandoned, session unmounted");
                } else {
                    tracing::warn!("[ChatSession] Failed to load chat history: {}", err);
                }
                self.state
                    .send_modify(|state| state.error = Some(err.to_string()));
            }
        }
    }

    async fn until_unmounted<T>(&self, action: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(KairosError::Cancelled),
            result = action => result,
        }
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
