//! The interactive client: page routing, command handling and the REPL loop.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use kairos_application::{ChatService, ChatSession, MemoryService, StatsService};
use kairos_core::config::KairosConfig;
use kairos_core::navigation::{NavigationState, Page};
use kairos_core::{KairosApi, KairosError};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use crate::commands::{COMMANDS, CliHelper, Command};
use crate::views::ChatView;
use crate::views::chat::memories_badge;
use crate::views::layout::{render_footer, render_header};
use crate::views::pages::render_placeholder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App<W: Write> {
    session: Arc<ChatSession>,
    stats: StatsService,
    memories: MemoryService,
    nav: NavigationState,
    page: Page,
    chat_view: ChatView,
    max_message_length: usize,
    out: W,
}

impl<W: Write> App<W> {
    pub fn new(api: Arc<dyn KairosApi>, config: &KairosConfig, out: W) -> Self {
        let chat = ChatService::new(api.clone()).with_history_limit(config.api.history_limit);
        Self {
            session: Arc::new(ChatSession::new(chat)),
            stats: StatsService::new(api.clone()),
            memories: MemoryService::new(api)
                .with_default_priority(config.app.default_memory_priority),
            nav: NavigationState::default(),
            page: Page::Chat,
            chat_view: ChatView::new(),
            max_message_length: config.app.max_message_length,
            out,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn prompt(&self) -> String {
        match self.page {
            Page::Chat => ">> ".to_string(),
            page => format!("{}> ", page.to_string().to_lowercase()),
        }
    }

    /// Shows the chat page and loads its history.
    pub async fn start(&mut self) -> Result<()> {
        self.session.mount().await;
        self.show_page(Page::Chat)?;
        writeln!(
            self.out,
            "{}",
            "Type a message to chat, '/help' for commands, or 'quit' to exit.".bright_black()
        )?;
        Ok(())
    }

    pub fn stop(&mut self) -> Result<()> {
        self.session.unmount();
        write!(self.out, "{}", render_footer(&self.nav))?;
        self.out.flush()?;
        Ok(())
    }

    pub async fn handle_input(&mut self, line: &str) -> Result<Flow> {
        match Command::parse(line) {
            Command::Empty => {}
            Command::Quit => {
                writeln!(self.out, "{}", "Goodbye!".bright_green())?;
                return Ok(Flow::Quit);
            }
            Command::Navigate(page) => self.show_page(page)?,
            Command::Message(text) => self.send(&text).await?,
            Command::Memories(setting) => {
                let include = match setting {
                    Some(include) => {
                        self.session.set_include_memories(include);
                        include
                    }
                    None => self.session.toggle_include_memories(),
                };
                writeln!(self.out, "{}", memories_badge(include))?;
            }
            Command::Remember { key, value } => {
                match self.memories.remember(&key, &value).await {
                    Ok(_) => writeln!(
                        self.out,
                        "{}",
                        format!("Remembered '{}'.", key).bright_green()
                    )?,
                    Err(err) => writeln!(self.out, "{}", format!("Error: {}", err).red())?,
                }
            }
            Command::Refresh => {
                self.session.load_chat_history().await;
                if self.page == Page::Chat {
                    let state = self.session.snapshot();
                    let rendered = self.chat_view.render_full(&state);
                    write!(self.out, "{}", rendered)?;
                }
            }
            Command::Dismiss => {
                self.session.clear_error();
                let state = self.session.snapshot();
                let rendered = self.chat_view.update(&state);
                write!(self.out, "{}", rendered)?;
                writeln!(self.out, "{}", "Error dismissed.".bright_black())?;
            }
            Command::Stats => match self.stats.get_stats().await {
                Ok(stats) => writeln!(
                    self.out,
                    "{}\n  Chat messages: {}\n  Spellbook memories: {}",
                    "Database".bold(),
                    stats.chat_history_count,
                    stats.spellbook_memories_count
                )?,
                Err(err) => writeln!(self.out, "{}", format!("Error: {}", err).red())?,
            },
            Command::Help => {
                for spec in COMMANDS {
                    let synopsis = match spec.usage {
                        Some(usage) => format!("{} {}", spec.name, usage),
                        None => spec.name.to_string(),
                    };
                    writeln!(
                        self.out,
                        "  {:<24} {}",
                        synopsis.bright_cyan(),
                        spec.help.bright_black()
                    )?;
                }
            }
            Command::Unknown(input) => writeln!(
                self.out,
                "{}",
                format!("Unknown command: {} (type /help)", input).yellow()
            )?,
        }
        self.out.flush()?;
        Ok(Flow::Continue)
    }

    fn show_page(&mut self, page: Page) -> Result<()> {
        self.page = page;
        self.nav.set_active_by_href(page.href());
        write!(self.out, "{}", render_header(&self.nav))?;

        if page.is_placeholder() {
            write!(self.out, "{}", render_placeholder(page))?;
        } else {
            let state = self.session.snapshot();
            let rendered = self.chat_view.render_full(&state);
            write!(self.out, "{}", rendered)?;
        }
        Ok(())
    }

    async fn send(&mut self, text: &str) -> Result<()> {
        if self.page != Page::Chat {
            writeln!(
                self.out,
                "{}",
                "Switch to the chat page with /chat to talk to Kairos.".yellow()
            )?;
            return Ok(());
        }

        let length = text.trim().chars().count();
        if length > self.max_message_length {
            let err = KairosError::validation(format!(
                "message is {} characters, the limit is {}",
                length, self.max_message_length
            ));
            writeln!(self.out, "{}", err.to_string().red())?;
            return Ok(());
        }

        if !self.session.can_send(text) {
            return Ok(());
        }

        let session = Arc::clone(&self.session);
        let mut updates = session.subscribe();
        updates.borrow_and_update();

        let send = session.send_message(text);
        tokio::pin!(send);

        loop {
            tokio::select! {
                _ = &mut send => break,
                changed = updates.changed() => {
                    if changed.is_err() {
                        (&mut send).await;
                        break;
                    }
                    let state = updates.borrow_and_update().clone();
                    let rendered = self.chat_view.update(&state);
                    write!(self.out, "{}", rendered)?;
                    self.out.flush()?;
                }
            }
        }

        let rendered = self.chat_view.update(&session.snapshot());
        write!(self.out, "{}", rendered)?;
        Ok(())
    }
}

/// Runs the REPL on the terminal until the user quits.
pub async fn run_repl(
    api: Arc<dyn KairosApi>,
    config: &KairosConfig,
    history_file: Option<PathBuf>,
) -> Result<()> {
    let mut app = App::new(api, config, std::io::stdout());

    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));
    if let Some(path) = &history_file {
        if rl.load_history(path).is_err() {
            tracing::debug!("[Repl] No input history at {}", path.display());
        }
    }

    app.start().await?;

    loop {
        let prompt = app.prompt();
        let readline = tokio::task::block_in_place(|| rl.readline(&prompt));

        match readline {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                if app.handle_input(&line).await? == Flow::Quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    app.stop()?;

    if let Some(path) = &history_file {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        if let Err(err) = rl.save_history(path) {
            tracing::warn!("[Repl] Failed to save input history: {}", err);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kairos_core::Result as KairosResult;
    use kairos_core::chat::{Acknowledgement, ChatMessage, ChatRequest, ChatResponse};
    use kairos_core::memory::{CreateMemoryRequest, Memory};
    use kairos_core::stats::DatabaseStats;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeApi {
        fail_chat: bool,
        requests: Mutex<Vec<ChatRequest>>,
        memories: Mutex<Vec<CreateMemoryRequest>>,
    }

    #[async_trait]
    impl KairosApi for FakeApi {
        async fn chat(&self, request: &ChatRequest) -> KairosResult<Option<ChatResponse>> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail_chat {
                return Err(KairosError::network("connection refused"));
            }
            Ok(Some(ChatResponse {
                response: format!("You said: {}", request.message),
                relevant_memories: Vec::new(),
                timestamp: Some("2024-01-01T12:00:05Z".into()),
            }))
        }

        async fn chat_history(&self, _limit: Option<u32>) -> KairosResult<Option<Vec<ChatMessage>>> {
            Ok(Some(Vec::new()))
        }

        async fn delete_chat_history(&self) -> KairosResult<Option<Acknowledgement>> {
            Ok(None)
        }

        async fn delete_chat_message(&self, _id: &str) -> KairosResult<Option<Acknowledgement>> {
            Ok(None)
        }

        async fn memories(&self) -> KairosResult<Option<Vec<Memory>>> {
            Ok(Some(Vec::new()))
        }

        async fn memory_by_id(&self, _id: &str) -> KairosResult<Option<Memory>> {
            Ok(None)
        }

        async fn add_memory(
            &self,
            request: &CreateMemoryRequest,
        ) -> KairosResult<Option<Acknowledgement>> {
            self.memories.lock().unwrap().push(request.clone());
            Ok(Some(Acknowledgement::default()))
        }

        async fn delete_memory(&self, _id: &str) -> KairosResult<Option<Acknowledgement>> {
            Ok(None)
        }

        async fn delete_memories(&self) -> KairosResult<Option<Acknowledgement>> {
            Ok(None)
        }

        async fn stats(&self) -> KairosResult<Option<DatabaseStats>> {
            Ok(Some(DatabaseStats {
                chat_history_count: 12,
                spellbook_memories_count: 3,
            }))
        }
    }

    async fn started(api: Arc<FakeApi>) -> App<Vec<u8>> {
        colored::control::set_override(false);
        let mut app = App::new(api, &KairosConfig::default(), Vec::new());
        app.start().await.unwrap();
        app.out.clear();
        app
    }

    fn output(app: &mut App<Vec<u8>>) -> String {
        let text = String::from_utf8(app.out.clone()).unwrap();
        app.out.clear();
        text
    }

    #[tokio::test]
    async fn start_renders_empty_chat() {
        colored::control::set_override(false);
        let mut app = App::new(Arc::new(FakeApi::default()), &KairosConfig::default(), Vec::new());
        app.start().await.unwrap();

        let out = output(&mut app);
        assert!(out.contains("Kairos AI"));
        assert!(out.contains("[Chat]"));
        assert!(out.contains("Start a conversation"));
    }

    #[tokio::test]
    async fn message_round_trip_is_printed() {
        let api = Arc::new(FakeApi::default());
        let mut app = started(api.clone()).await;

        assert_eq!(app.handle_input("hello").await.unwrap(), Flow::Continue);

        let out = output(&mut app);
        assert!(out.contains("hello"));
        assert!(out.contains("You said: hello"));
        assert_eq!(app.session().snapshot().messages.len(), 2);
        assert!(!app.session().snapshot().is_sending);
    }

    #[tokio::test]
    async fn failed_send_shows_error_banner() {
        let api = Arc::new(FakeApi {
            fail_chat: true,
            ..Default::default()
        });
        let mut app = started(api).await;

        app.handle_input("hello").await.unwrap();

        let out = output(&mut app);
        assert!(out.contains("Error: Network error: connection refused"));
        assert!(out.contains("I'm sorry, I'm having trouble connecting right now."));

        app.handle_input("/dismiss").await.unwrap();
        assert!(app.session().snapshot().error.is_none());
    }

    #[tokio::test]
    async fn overlong_messages_are_rejected_locally() {
        let api = Arc::new(FakeApi::default());
        let mut app = started(api.clone()).await;

        app.handle_input(&"a".repeat(1001)).await.unwrap();

        let out = output(&mut app);
        assert!(out.contains("Invalid input: message is 1001 characters, the limit is 1000"));
        assert!(api.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn memory_toggle_reaches_the_request() {
        let api = Arc::new(FakeApi::default());
        let mut app = started(api.clone()).await;

        app.handle_input("/memories").await.unwrap();
        assert!(output(&mut app).contains("Memories On"));
        app.handle_input("hi").await.unwrap();

        assert!(api.requests.lock().unwrap()[0].include_memories);
    }

    #[tokio::test]
    async fn navigation_switches_pages() {
        let mut app = started(Arc::new(FakeApi::default())).await;

        app.handle_input("/spellbook").await.unwrap();
        assert_eq!(app.page(), Page::Spellbook);
        let out = output(&mut app);
        assert!(out.contains("[Spellbook]"));
        assert!(out.contains("Memory management interface coming soon..."));
        assert_eq!(app.prompt(), "spellbook> ");

        app.handle_input("hello").await.unwrap();
        assert!(output(&mut app).contains("/chat"));
        assert!(app.session().snapshot().messages.is_empty());
    }

    #[tokio::test]
    async fn remember_uses_configured_priority() {
        colored::control::set_override(false);
        let api = Arc::new(FakeApi::default());
        let mut config = KairosConfig::default();
        config.app.default_memory_priority = 8;
        let mut app = App::new(api.clone(), &config, Vec::new());

        app.handle_input("/remember tea green, no sugar").await.unwrap();

        assert!(output(&mut app).contains("Remembered 'tea'."));
        let memories = api.memories.lock().unwrap();
        assert_eq!(memories[0].memory_key, "tea");
        assert_eq!(memories[0].memory_value, "green, no sugar");
        assert_eq!(memories[0].priority, 8);
    }

    #[tokio::test]
    async fn dismiss_after_failure_prints_no_stale_banner() {
        let api = Arc::new(FakeApi {
            fail_chat: true,
            ..Default::default()
        });
        let mut app = started(api).await;
        app.handle_input("hello").await.unwrap();
        output(&mut app);

        app.handle_input("/dismiss").await.unwrap();
        let out = output(&mut app);
        assert!(out.contains("Error dismissed."));
        assert!(!out.contains("(type /dismiss)"));

        app.handle_input("/chat").await.unwrap();
        assert!(!output(&mut app).contains("(type /dismiss)"));
    }

    #[tokio::test]
    async fn stats_and_quit() {
        let mut app = started(Arc::new(FakeApi::default())).await;

        app.handle_input("/stats").await.unwrap();
        let out = output(&mut app);
        assert!(out.contains("Chat messages: 12"));
        assert!(out.contains("Spellbook memories: 3"));

        assert_eq!(app.handle_input("quit").await.unwrap(), Flow::Quit);
    }
}
