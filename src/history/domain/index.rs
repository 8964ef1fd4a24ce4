//! Per-day index entries derived from a day's log.

use super::{Turn, TurnRole, top_topics};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Number of topics kept per day.
pub const MAX_TOPICS: usize = 8;
/// Number of operator turns excerpted as highlights.
pub const MAX_HIGHLIGHTS: usize = 5;
/// Character budget of one highlight before it is cut.
pub const HIGHLIGHT_CHARS: usize = 32;

const SUMMARY_TOPICS: usize = 5;
const SUMMARY_HIGHLIGHTS: usize = 3;
const ELLIPSIS: &str = "...";

/// Derived summary of one day's conversation.
///
/// Entries are never patched: [`DayIndexEntry::rebuild`] recomputes every
/// field from the full day log, and the result depends only on the log
/// apart from `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayIndexEntry {
    date: NaiveDate,
    topics: Vec<String>,
    summary: String,
    highlights: Vec<String>,
    turns: usize,
    messages: usize,
    updated_at: DateTime<Utc>,
}

impl DayIndexEntry {
    /// Rebuilds the entry for `date` from that day's turns.
    ///
    /// Topics and highlights come from operator turns only; `turns` counts
    /// operator turns and `messages` counts every turn.
    #[must_use]
    pub fn rebuild(date: NaiveDate, log: &[Turn], rebuilt_at: DateTime<Utc>) -> Self {
        let operator_texts: Vec<&str> = log
            .iter()
            .filter(|turn| turn.role() == TurnRole::Operator)
            .map(Turn::text)
            .collect();

        let topics = top_topics(operator_texts.iter().copied(), MAX_TOPICS);
        let highlights: Vec<String> = operator_texts
            .iter()
            .take(MAX_HIGHLIGHTS)
            .map(|text| shorten(text))
            .collect();
        let summary = summarize(&topics, &highlights);

        Self {
            date,
            topics,
            summary,
            highlights,
            turns: operator_texts.len(),
            messages: log.len(),
            updated_at: rebuilt_at,
        }
    }

    /// Returns the calendar date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the most frequent operator keywords, most frequent first.
    #[must_use]
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// Returns the generated summary sentence.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns excerpts of the day's first operator turns.
    #[must_use]
    pub fn highlights(&self) -> &[String] {
        &self.highlights
    }

    /// Returns the number of operator turns.
    #[must_use]
    pub const fn turns(&self) -> usize {
        self.turns
    }

    /// Returns the number of turns of any role.
    #[must_use]
    pub const fn messages(&self) -> usize {
        self.messages
    }

    /// Returns when the entry was last rebuilt.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when `needle` (already lowercase) occurs in the date,
    /// topics or summary, ignoring case.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        let haystack = format!(
            "{} {} {}",
            self.date,
            self.topics.join(" "),
            self.summary
        )
        .to_lowercase();
        haystack.contains(needle)
    }

    /// Scores the entry against recall tokens.
    ///
    /// Each token scores 5 when it equals a topic and 2 when it occurs in
    /// the summary, both ignoring case.
    #[must_use]
    pub fn recall_score(&self, tokens: &[String]) -> usize {
        let summary = self.summary.to_lowercase();
        tokens
            .iter()
            .map(|token| token.to_lowercase())
            .map(|token| {
                let topic_hit = self
                    .topics
                    .iter()
                    .any(|topic| topic.to_lowercase() == token);
                let summary_hit = summary.contains(&token);
                usize::from(topic_hit) * 5 + usize::from(summary_hit) * 2
            })
            .sum()
    }
}

fn shorten(text: &str) -> String {
    let flattened = text.replace('\n', " ");
    let trimmed = flattened.trim();
    if trimmed.chars().count() <= HIGHLIGHT_CHARS {
        return trimmed.to_owned();
    }

    let mut cut: String = trimmed.chars().take(HIGHLIGHT_CHARS).collect();
    cut.push_str(ELLIPSIS);
    cut
}

fn summarize(topics: &[String], highlights: &[String]) -> String {
    let topic_text = if topics.is_empty() {
        "no clear topic".to_owned()
    } else {
        topics
            .iter()
            .take(SUMMARY_TOPICS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    if highlights.is_empty() {
        return format!("Mainly about {topic_text}");
    }

    let questions = highlights
        .iter()
        .take(SUMMARY_HIGHLIGHTS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("; ");
    format!("Mainly about {topic_text}; key questions: {questions}")
}
