//! Validated advisor alias type.

use super::AdvisorDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operator-chosen handle that identifies an advisor.
///
/// Aliases are what the operator types after `@` to address an advisor, so
/// they are kept verbatim apart from surrounding whitespace. Any script is
/// accepted (e.g. `codex`, `诸葛亮`), but inner whitespace and `@` are not,
/// since a mention ends at either.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdvisorAlias(String);

impl AdvisorAlias {
    /// Creates a validated alias.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorDomainError::EmptyAlias`] when the value is empty
    /// after trimming, or [`AdvisorDomainError::InvalidAliasCharacter`] when
    /// it contains whitespace or `@`.
    pub fn new(value: impl Into<String>) -> Result<Self, AdvisorDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(AdvisorDomainError::EmptyAlias);
        }
        if let Some(found) = normalized
            .chars()
            .find(|ch| ch.is_whitespace() || *ch == '@')
        {
            return Err(AdvisorDomainError::InvalidAliasCharacter(found));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the alias as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AdvisorAlias {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for AdvisorAlias {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Display for AdvisorAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
