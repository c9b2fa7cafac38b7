//! Terminal rendering of the chat page.
//!
//! The REPL prints rather than repaints, so `ChatView` remembers what it has
//! already shown and `update` emits only what changed since.

use colored::Colorize;
use kairos_application::ChatSessionState;
use kairos_core::chat::{ChatMessage, format_timestamp};

pub const CHAT_TITLE: &str = "Chat with Kairos";
pub const EMPTY_TITLE: &str = "Start a conversation";
pub const EMPTY_HINT: &str = "Send a message below to begin chatting with Kairos";
pub const THINKING_TEXT: &str = "Kairos is thinking...";
pub const PROCESSING_TEXT: &str = "Processing your message...";
pub const LOADING_TEXT: &str = "Loading conversation...";

#[derive(Debug, Default)]
pub struct ChatView {
    shown_messages: Vec<ChatMessage>,
    shown_error: Option<String>,
    thinking_shown: bool,
    loading_shown: bool,
}

pub fn memories_badge(include: bool) -> String {
    if include {
        "Memories On".bright_green().to_string()
    } else {
        "Memories Off".bright_black().to_string()
    }
}

fn render_message(message: &ChatMessage) -> String {
    let time = format_timestamp(&message.timestamp);
    let (label, body) = if message.is_user() {
        ("You".green().bold(), message.content.green())
    } else {
        ("Kairos".bright_magenta().bold(), message.content.bright_blue())
    };
    format!("{} {}\n{}\n\n", label, time.bright_black(), body)
}

fn render_error(error: &str) -> String {
    format!(
        "{} {}\n",
        format!("Error: {}", error).red(),
        "(type /dismiss)".bright_black()
    )
}

fn render_thinking() -> String {
    format!(
        "{}\n{}\n",
        THINKING_TEXT.bright_magenta().italic(),
        PROCESSING_TEXT.bright_black()
    )
}

impl ChatView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the whole page and records it as shown.
    pub fn render_full(&mut self, state: &ChatSessionState) -> String {
        let mut out = format!(
            "\n{}  {}\n{}\n",
            CHAT_TITLE.bright_magenta().bold(),
            memories_badge(state.include_memories),
            "Conversation".bold()
        );

        if let Some(error) = &state.error {
            out.push_str(&render_error(error));
        }

        if state.is_loading {
            out.push_str(&format!("{}\n", LOADING_TEXT.bright_black()));
        } else if state.messages.is_empty() {
            out.push_str(&format!(
                "\n{}\n{}\n\n",
                EMPTY_TITLE.bold(),
                EMPTY_HINT.bright_black()
            ));
        }

        for message in &state.messages {
            out.push_str(&render_message(message));
        }

        if state.is_thinking {
            out.push_str(&render_thinking());
        }

        self.remember(state);
        out
    }

    /// Renders what changed since the last render.
    ///
    /// Falls back to a full render when messages were replaced rather than
    /// appended.
    pub fn update(&mut self, state: &ChatSessionState) -> String {
        if !state.messages.starts_with(&self.shown_messages) {
            return self.render_full(state);
        }

        let mut out = String::new();

        if state.is_loading && !self.loading_shown {
            out.push_str(&format!("{}\n", LOADING_TEXT.bright_black()));
        }

        for message in &state.messages[self.shown_messages.len()..] {
            out.push_str(&render_message(message));
        }

        if state.error.is_some() && state.error != self.shown_error {
            if let Some(error) = &state.error {
                out.push_str(&render_error(error));
            }
        }

        if state.is_thinking && !self.thinking_shown {
            out.push_str(&render_thinking());
        }

        self.remember(state);
        out
    }

    fn remember(&mut self, state: &ChatSessionState) {
        self.shown_messages = state.messages.clone();
        self.shown_error = state.error.clone();
        self.thinking_shown = state.is_thinking;
        self.loading_shown = state.is_loading;
    }
}
