use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use kairos_core::navigation::Page;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// A slash command as listed by `/help`.
pub struct CommandSpec {
    pub name: &'static str,
    /// Argument synopsis, shown as a hint once the name is typed.
    pub usage: Option<&'static str>,
    pub help: &'static str,
}

const fn command(
    name: &'static str,
    usage: Option<&'static str>,
    help: &'static str,
) -> CommandSpec {
    CommandSpec { name, usage, help }
}

pub const COMMANDS: &[CommandSpec] = &[
    command("/chat", None, "Go to the chat page"),
    command("/persona", None, "Go to the persona page"),
    command("/spellbook", None, "Go to the spellbook page"),
    command("/history", None, "Go to the history page"),
    command("/memories", Some("[on|off]"), "Toggle or set memory inclusion"),
    command("/remember", Some("<key> <value>"), "Add a memory to the spellbook"),
    command("/refresh", None, "Reload the chat history"),
    command("/dismiss", None, "Dismiss the current error"),
    command("/stats", None, "Show backend statistics"),
    command("/help", None, "Show this help"),
    command("/quit", None, "Exit Kairos"),
];

const MEMORY_SWITCHES: &[&str] = &["on", "off"];

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Navigate(Page),
    /// `None` toggles, `Some` sets.
    Memories(Option<bool>),
    Remember { key: String, value: String },
    Refresh,
    Dismiss,
    Stats,
    Help,
    Quit,
    /// Plain text to send to Kairos.
    Message(String),
    Unknown(String),
    Empty,
}

fn is_bare_quit(input: &str) -> bool {
    matches!(input, "quit" | "exit")
}

impl Command {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }
        if is_bare_quit(trimmed) {
            return Command::Quit;
        }
        if !trimmed.starts_with('/') {
            return Command::Message(input.to_string());
        }

        let (name, rest) = trimmed
            .split_once(char::is_whitespace)
            .map(|(name, rest)| (name, rest.trim_start()))
            .unwrap_or((trimmed, ""));
        let args: Vec<&str> = rest.split_whitespace().collect();

        match (name, args.as_slice()) {
            ("/chat", []) => Command::Navigate(Page::Chat),
            ("/persona", []) => Command::Navigate(Page::Persona),
            ("/spellbook", []) => Command::Navigate(Page::Spellbook),
            ("/history", []) => Command::Navigate(Page::History),
            ("/memories", []) => Command::Memories(None),
            ("/memories", ["on"]) => Command::Memories(Some(true)),
            ("/memories", ["off"]) => Command::Memories(Some(false)),
            ("/remember", [key, _, ..]) => Command::Remember {
                key: key.to_string(),
                value: rest[key.len()..].trim().to_string(),
            },
            ("/refresh", []) => Command::Refresh,
            ("/dismiss", []) => Command::Dismiss,
            ("/stats", []) => Command::Stats,
            ("/help", []) => Command::Help,
            ("/quit", []) | ("/exit", []) => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

fn find_spec(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

#[derive(Debug, PartialEq, Eq)]
enum LineKind {
    Quit,
    Command,
    UnknownCommand,
    Text,
}

fn classify(line: &str) -> LineKind {
    let trimmed = line.trim();
    if is_bare_quit(trimmed) {
        return LineKind::Quit;
    }
    if !trimmed.starts_with('/') {
        return LineKind::Text;
    }
    let name = trimmed.split_whitespace().next().unwrap_or_default();
    if find_spec(name).is_some() || name == "/exit" {
        LineKind::Command
    } else {
        LineKind::UnknownCommand
    }
}

/// Line editor support: completes command names and `/memories` switches,
/// hints argument usage and colours input by what it will do.
pub struct CliHelper;

impl CliHelper {
    pub fn new() -> Self {
        Self
    }

    fn command_names<'a>(prefix: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        COMMANDS
            .iter()
            .map(|spec| spec.name)
            .filter(move |name| name.starts_with(prefix))
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        let to_pair = |candidate: &str| Pair {
            display: candidate.to_string(),
            replacement: candidate.to_string(),
        };

        if let Some(switch) = line.strip_prefix("/memories ") {
            let start = line.len() - switch.len();
            let candidates = MEMORY_SWITCHES
                .iter()
                .filter(|option| option.starts_with(switch))
                .map(|option| to_pair(option))
                .collect();
            return Ok((start, candidates));
        }

        if line.starts_with('/') && !line.contains(' ') {
            Ok((0, Self::command_names(line).map(to_pair).collect()))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match classify(line) {
            LineKind::Quit => Owned(line.bright_green().to_string()),
            LineKind::Command => Owned(line.bright_cyan().to_string()),
            LineKind::UnknownCommand => Owned(line.yellow().to_string()),
            LineKind::Text => Borrowed(line),
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') {
            return None;
        }

        match line.strip_suffix(' ') {
            Some(name) if !name.contains(' ') => {
                find_spec(name).and_then(|spec| spec.usage).map(String::from)
            }
            _ if !line.contains(' ') => Self::command_names(line)
                .find(|name| name.len() > line.len())
                .map(|name| name[line.len()..].to_string()),
            _ => None,
        }
    }
}

impl Validator for CliHelper {}
