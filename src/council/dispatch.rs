//! Resolution of an utterance into target advisors and message content.

use crate::advisor::domain::{AdvisorAlias, AdvisorRoster};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

#[expect(clippy::expect_used, reason = "the mention pattern is a compile-time literal")]
static MENTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([^\s@]+)").expect("mention pattern should compile"));

/// How targets are chosen for an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Only advisors named with `@alias` are addressed.
    Mention,
    /// Every registered advisor is addressed, in registration order.
    Broadcast,
}

/// Errors returned while planning a dispatch.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// No known advisor was mentioned.
    #[error("no known advisor mentioned; address one with @alias")]
    NoTarget,
    /// Nothing is left to send once mentions are removed.
    #[error("message content is empty")]
    EmptyContent,
}

/// Resolved targets and the content they receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchPlan {
    targets: Vec<AdvisorAlias>,
    content: String,
}

impl DispatchPlan {
    /// Plans the dispatch of `utterance` against `roster`.
    ///
    /// In mention mode every `@token` is stripped from the content, but only
    /// tokens naming a registered alias become targets; repeated mentions
    /// collapse to the first. Broadcast mode sends the utterance unchanged to
    /// every advisor, which is an empty target list for an empty roster.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NoTarget`] when mention mode finds no known
    /// alias, then [`DispatchError::EmptyContent`] when the stripped content
    /// is blank.
    pub fn resolve(
        utterance: &str,
        roster: &AdvisorRoster,
        mode: DispatchMode,
    ) -> Result<Self, DispatchError> {
        match mode {
            DispatchMode::Broadcast => Ok(Self {
                targets: roster.aliases().cloned().collect(),
                content: utterance.to_owned(),
            }),
            DispatchMode::Mention => {
                let mut targets: Vec<AdvisorAlias> = Vec::new();
                let mentioned = MENTION_PATTERN
                    .captures_iter(utterance)
                    .filter_map(|captures| captures.get(1))
                    .filter_map(|handle| roster.find_by_str(handle.as_str()));
                for advisor in mentioned {
                    if !targets.contains(advisor.alias()) {
                        targets.push(advisor.alias().clone());
                    }
                }
                if targets.is_empty() {
                    return Err(DispatchError::NoTarget);
                }

                let content = MENTION_PATTERN.replace_all(utterance, "").trim().to_owned();
                if content.is_empty() {
                    return Err(DispatchError::EmptyContent);
                }
                Ok(Self { targets, content })
            }
        }
    }

    /// Returns the target aliases in dispatch order.
    #[must_use]
    pub fn targets(&self) -> &[AdvisorAlias] {
        &self.targets
    }

    /// Returns the content each target receives.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}
