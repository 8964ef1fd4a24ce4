//! Conversation turn records.

use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    /// The human operator.
    #[serde(alias = "user")]
    Operator,
    /// A council advisor.
    #[serde(alias = "assistant")]
    Advisor,
}

impl TurnRole {
    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Operator => "operator",
            Self::Advisor => "advisor",
        }
    }
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded utterance. Turns are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: TurnRole,
    speaker: String,
    text: String,
    #[serde(alias = "time")]
    timestamp: DateTime<Utc>,
}

impl Turn {
    /// Creates a turn with an explicit timestamp.
    #[must_use]
    pub fn new(
        role: TurnRole,
        speaker: impl Into<String>,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            role,
            speaker: speaker.into(),
            text: text.into(),
            timestamp,
        }
    }

    /// Creates an operator turn stamped with the clock's current time.
    #[must_use]
    pub fn operator(speaker: impl Into<String>, text: impl Into<String>, clock: &impl Clock) -> Self {
        Self::new(TurnRole::Operator, speaker, text, clock.utc())
    }

    /// Creates an advisor turn stamped with the clock's current time.
    #[must_use]
    pub fn advisor(alias: impl Into<String>, text: impl Into<String>, clock: &impl Clock) -> Self {
        Self::new(TurnRole::Advisor, alias, text, clock.utc())
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> TurnRole {
        self.role
    }

    /// Returns the speaker: the operator's name or the advisor alias.
    #[must_use]
    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    /// Returns the utterance text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the UTC timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the UTC calendar date that owns this turn's log.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}
