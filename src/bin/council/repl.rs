//! Line-oriented front end over a [`Council`].

use chrono::NaiveDate;
use council::advisor::ports::AdvisorRepository;
use council::council::prompt::render_transcript;
use council::council::{ChatOutcome, Council, DispatchMode};
use council::history::domain::DayIndexEntry;
use council::transport::ports::AdvisorInvoker;
use mockable::Clock;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Command summary shown by `/help`.
pub const HELP: &str = "\
@alias text               ask the mentioned advisors
/c text                   ask every advisor in turn
/models                   list advisors
/add alias transport cmd  register or replace an advisor (transport: stub, arg, stdin)
/history                  show the session transcript
/reset                    clear the session transcript (logs are kept)
/dates [query]            list or search recorded days
/day YYYY-MM-DD           show one day's log
/help                     show this help
/exit                     quit";

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `@alias text`, or any plain line.
    Mention(&'a str),
    /// `/c text`.
    Broadcast(&'a str),
    /// `/models`.
    Models,
    /// `/add alias transport command...`.
    Add(&'a str),
    /// `/history`.
    History,
    /// `/reset`.
    Reset,
    /// `/dates [query]`.
    Dates(&'a str),
    /// `/day YYYY-MM-DD`.
    Day(&'a str),
    /// `/help`.
    Help,
    /// `/exit` or `/quit`.
    Exit,
    /// A blank line.
    Empty,
    /// An unrecognised slash command.
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    /// Parses a line. Anything that is not a slash command is a mention
    /// chat.
    #[must_use]
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        if !trimmed.starts_with('/') {
            return Self::Mention(trimmed);
        }

        let (name, rest) = trimmed
            .split_once(char::is_whitespace)
            .map_or((trimmed, ""), |(name, rest)| (name, rest.trim()));
        match name {
            "/c" => Self::Broadcast(rest),
            "/models" => Self::Models,
            "/add" => Self::Add(rest),
            "/history" => Self::History,
            "/reset" => Self::Reset,
            "/dates" => Self::Dates(rest),
            "/day" => Self::Day(rest),
            "/help" => Self::Help,
            "/exit" | "/quit" => Self::Exit,
            _ => Self::Unknown(name),
        }
    }
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to show; empty means nothing to show.
    Text(String),
    /// Stop reading input.
    Exit,
}

/// Runs one command against the council.
pub async fn execute<R, I, C>(council: &Council<R, I, C>, command: Command<'_>) -> Reply
where
    R: AdvisorRepository,
    I: AdvisorInvoker,
    C: Clock + Send + Sync,
{
    let text = match command {
        Command::Empty => return Reply::Text(String::new()),
        Command::Exit => return Reply::Exit,
        Command::Help => HELP.to_owned(),
        Command::Mention(text) => chat(council, text, DispatchMode::Mention).await,
        Command::Broadcast(text) => chat(council, text, DispatchMode::Broadcast).await,
        Command::Models => list_advisors(council).await,
        Command::Add(line) => match council.register_from_command_line(line).await {
            Ok(advisor) => format!("registered {} ({})", advisor.alias(), advisor.kind()),
            Err(err) => format!("error: {err}"),
        },
        Command::History => {
            let transcript = council.transcript().await;
            if transcript.is_empty() {
                "(no conversation yet)".to_owned()
            } else {
                render_transcript(&transcript)
            }
        }
        Command::Reset => {
            council.reset().await;
            "session transcript cleared".to_owned()
        }
        Command::Dates(query) => render_dates(&council.search_dates(query).await),
        Command::Day(raw) => show_day(council, raw).await,
        Command::Unknown(name) => format!("unknown command {name}; try /help"),
    };
    Reply::Text(text)
}

/// Reads commands from `input` until `/exit` or end of input.
///
/// # Errors
///
/// Returns an I/O error when reading input or writing output fails.
pub async fn run<R, I, C, In, Out>(
    council: &Council<R, I, C>,
    input: In,
    output: &mut Out,
) -> io::Result<()>
where
    R: AdvisorRepository,
    I: AdvisorInvoker,
    C: Clock + Send + Sync,
    In: AsyncBufRead + Unpin,
    Out: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match execute(council, Command::parse(&line)).await {
            Reply::Exit => break,
            Reply::Text(text) if text.is_empty() => {}
            Reply::Text(text) => {
                output.write_all(text.as_bytes()).await?;
                output.write_all(b"\n").await?;
                output.flush().await?;
            }
        }
    }
    Ok(())
}

async fn chat<R, I, C>(council: &Council<R, I, C>, text: &str, mode: DispatchMode) -> String
where
    R: AdvisorRepository,
    I: AdvisorInvoker,
    C: Clock + Send + Sync,
{
    match council.chat(text, mode).await {
        Ok(outcome) => render_replies(&outcome),
        Err(err) => format!("error: {err}"),
    }
}

fn render_replies(outcome: &ChatOutcome) -> String {
    if outcome.replies.is_empty() {
        return "(no advisors answered)".to_owned();
    }
    outcome
        .replies
        .iter()
        .map(|turn| format!("[{}] {}", turn.speaker(), turn.text()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

async fn list_advisors<R, I, C>(council: &Council<R, I, C>) -> String
where
    R: AdvisorRepository,
    I: AdvisorInvoker,
    C: Clock + Send + Sync,
{
    let advisors = council.list_advisors().await;
    if advisors.is_empty() {
        return "(no advisors registered)".to_owned();
    }
    advisors
        .iter()
        .enumerate()
        .map(|(position, advisor)| {
            format!(
                "{}. {} | {} | {}",
                position + 1,
                advisor.alias(),
                advisor.kind(),
                advisor.command_line()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_dates(entries: &[DayIndexEntry]) -> String {
    if entries.is_empty() {
        return "(no recorded days)".to_owned();
    }
    entries
        .iter()
        .map(|entry| {
            format!(
                "{} | {} messages | {}",
                entry.date(),
                entry.messages(),
                entry.summary()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

async fn show_day<R, I, C>(council: &Council<R, I, C>, raw: &str) -> String
where
    R: AdvisorRepository,
    I: AdvisorInvoker,
    C: Clock + Send + Sync,
{
    let Ok(date) = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") else {
        return "error: expected a date as YYYY-MM-DD".to_owned();
    };
    match council.load_date(date).await {
        Ok(turns) if turns.is_empty() => format!("(no turns recorded on {date})"),
        Ok(turns) => render_transcript(&turns),
        Err(err) => format!("error: {err}"),
    }
}
