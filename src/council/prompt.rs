//! Prompt composition for advisor invocations.

use crate::history::domain::{DayIndexEntry, Turn};
use chrono::SecondsFormat;
use minijinja::{Environment, context};
use thiserror::Error;

/// Heading that introduces the operator's question in every prompt.
pub const QUESTION_HEADING: &str = "[Current question]";

/// Default description of how the council works.
pub const DEFAULT_ROLE_FRAMING: &str = "You sit on a war council alongside other advisors. \
The operator addresses advisors with @alias or speaks to the whole council at once. \
Read the transcript, build on earlier advice where it helps, and keep your counsel concrete.";

/// Number of transcript turns shown to an advisor by default.
pub const DEFAULT_TRANSCRIPT_WINDOW: usize = 30;
/// Number of recalled days shown to an advisor by default.
pub const DEFAULT_RECALL_LIMIT: usize = 3;

const RECALL_TOPICS: usize = 6;
const EMPTY_TRANSCRIPT: &str = "(no conversation yet)";
const EMPTY_RECALL: &str = "(no related history)";

const PROMPT_TEMPLATE: &str = "[Council convention]
{{ framing }}

[Your role]
You are the advisor \"{{ alias }}\".

[Recent transcript]
{{ transcript }}

[Long-term memory]
{{ recall }}

{{ question_heading }}
{{ question }}

Answer directly.";

/// Errors returned while composing a prompt.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The prompt template failed to render.
    #[error("failed to render advisor prompt: {0}")]
    Render(#[from] minijinja::Error),
}

/// Builds the text sent to one advisor for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptComposer {
    role_framing: String,
    transcript_window: usize,
    recall_limit: usize,
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new(
            DEFAULT_ROLE_FRAMING,
            DEFAULT_TRANSCRIPT_WINDOW,
            DEFAULT_RECALL_LIMIT,
        )
    }
}

impl PromptComposer {
    /// Creates a composer.
    #[must_use]
    pub fn new(
        role_framing: impl Into<String>,
        transcript_window: usize,
        recall_limit: usize,
    ) -> Self {
        Self {
            role_framing: role_framing.into(),
            transcript_window,
            recall_limit,
        }
    }

    /// Returns how many recalled days a prompt carries.
    #[must_use]
    pub const fn recall_limit(&self) -> usize {
        self.recall_limit
    }

    /// Composes the prompt for `alias`.
    ///
    /// Sections appear in a fixed order: council convention, the advisor's
    /// role, the most recent transcript turns, recalled days, the question
    /// and a closing instruction.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Render`] when template rendering fails.
    pub fn compose(
        &self,
        alias: &str,
        transcript: &[Turn],
        recall: &[DayIndexEntry],
        question: &str,
    ) -> Result<String, PromptError> {
        let environment = Environment::new();
        let rendered = environment.render_str(
            PROMPT_TEMPLATE,
            context! {
                framing => self.role_framing.trim(),
                alias => alias,
                transcript => render_transcript_window(transcript, self.transcript_window),
                recall => render_recall_notes(recall),
                question_heading => QUESTION_HEADING,
                question => question.trim(),
            },
        )?;
        Ok(rendered)
    }
}

/// Renders every turn as `n. [timestamp] speaker (role): text`.
#[must_use]
pub fn render_transcript(turns: &[Turn]) -> String {
    render_transcript_window(turns, turns.len())
}

/// Renders the last `window` turns, numbered by their position in the
/// whole transcript.
#[must_use]
pub fn render_transcript_window(turns: &[Turn], window: usize) -> String {
    let skipped = turns.len().saturating_sub(window);
    let lines: Vec<String> = turns
        .iter()
        .enumerate()
        .skip(skipped)
        .map(|(index, turn)| {
            format!(
                "{}. [{}] {} ({}): {}",
                index + 1,
                turn.timestamp().to_rfc3339_opts(SecondsFormat::Secs, true),
                turn.speaker(),
                turn.role(),
                turn.text()
            )
        })
        .collect();

    if lines.is_empty() {
        EMPTY_TRANSCRIPT.to_owned()
    } else {
        lines.join("\n")
    }
}

/// Renders recalled days as `- DATE: topics [..]; summary: ...` lines.
#[must_use]
pub fn render_recall_notes(entries: &[DayIndexEntry]) -> String {
    if entries.is_empty() {
        return EMPTY_RECALL.to_owned();
    }

    entries
        .iter()
        .map(|entry| {
            let topics = if entry.topics().is_empty() {
                "none".to_owned()
            } else {
                entry
                    .topics()
                    .iter()
                    .take(RECALL_TOPICS)
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            format!(
                "- {}: topics [{topics}]; summary: {}",
                entry.date(),
                entry.summary()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extracts the operator's question from a composed prompt.
///
/// The question is the paragraph that follows [`QUESTION_HEADING`]. Returns
/// `None` when the prompt has no such section.
#[must_use]
pub fn extract_question(prompt: &str) -> Option<&str> {
    let (_, after_heading) = prompt.split_once(QUESTION_HEADING)?;
    let body = after_heading.strip_prefix('\n').unwrap_or(after_heading);
    let paragraph = body.split_once("\n\n").map_or(body, |(first, _)| first);
    Some(paragraph.trim())
}
