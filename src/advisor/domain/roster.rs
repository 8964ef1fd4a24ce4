//! Ordered advisor set with alias uniqueness.

use super::{Advisor, AdvisorAlias};

/// The registered advisors in registration order.
///
/// Aliases are unique: inserting an advisor whose alias already exists
/// replaces that entry in place, keeping its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvisorRoster {
    advisors: Vec<Advisor>,
}

impl AdvisorRoster {
    /// Creates an empty roster.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            advisors: Vec::new(),
        }
    }

    /// Builds a roster from persisted advisors.
    ///
    /// Later duplicates of an alias overwrite earlier ones, so the result
    /// always satisfies the uniqueness invariant.
    #[must_use]
    pub fn from_advisors(advisors: impl IntoIterator<Item = Advisor>) -> Self {
        let mut roster = Self::new();
        for advisor in advisors {
            roster.upsert(advisor);
        }
        roster
    }

    /// Inserts or replaces an advisor by alias.
    ///
    /// Returns `true` when an existing entry was replaced.
    pub fn upsert(&mut self, advisor: Advisor) -> bool {
        if let Some(existing) = self
            .advisors
            .iter_mut()
            .find(|candidate| candidate.alias() == advisor.alias())
        {
            *existing = advisor;
            return true;
        }

        self.advisors.push(advisor);
        false
    }

    /// Finds an advisor by alias.
    #[must_use]
    pub fn find(&self, alias: &AdvisorAlias) -> Option<&Advisor> {
        self.advisors
            .iter()
            .find(|candidate| candidate.alias() == alias)
    }

    /// Finds an advisor by raw alias text.
    #[must_use]
    pub fn find_by_str(&self, alias: &str) -> Option<&Advisor> {
        self.advisors
            .iter()
            .find(|candidate| candidate.alias().as_str() == alias)
    }

    /// Returns aliases in registration order.
    pub fn aliases(&self) -> impl Iterator<Item = &AdvisorAlias> {
        self.advisors.iter().map(Advisor::alias)
    }

    /// Returns all advisors in registration order.
    #[must_use]
    pub fn as_slice(&self) -> &[Advisor] {
        &self.advisors
    }

    /// Returns the number of registered advisors.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.advisors.len()
    }

    /// Returns `true` when no advisor is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.advisors.is_empty()
    }
}
