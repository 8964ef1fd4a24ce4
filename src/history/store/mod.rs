//! File-backed history store.
//!
//! Day logs are only ever appended to. The index is derived: after each
//! append the touched days are rebuilt from their logs and the whole index
//! file is rewritten. A missing or unreadable index is rebuilt from the
//! logs when the store opens, and day logs the index does not list are
//! indexed then too.

mod error;
mod files;

pub use error::{HistoryError, HistoryResult};
pub use files::INDEX_FILE_NAME;

use crate::history::domain::{DayIndexEntry, Turn, tokenize};
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use chrono::NaiveDate;
use mockable::Clock;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Durable store for day logs and the derived day index.
#[derive(Debug)]
pub struct HistoryStore {
    dir: Dir,
    index: BTreeMap<NaiveDate, DayIndexEntry>,
}

impl HistoryStore {
    /// Opens the store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] when the directory cannot be opened or an
    /// index rebuild fails.
    pub fn open(root: &Utf8Path, clock: &impl Clock) -> HistoryResult<Self> {
        let open_error = |source| HistoryError::OpenDirectory {
            path: root.to_string(),
            source,
        };
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(open_error)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(open_error)?;

        let mut store = Self {
            dir,
            index: BTreeMap::new(),
        };
        match files::read_index(&store.dir)? {
            Some(index) => {
                store.index = index;
                store.index_unlisted_days(clock)?;
            }
            None if !files::log_dates(&store.dir)?.is_empty() => {
                info!(path = %root, "history index missing; rebuilding from day logs");
                store.rebuild_all(clock)?;
            }
            None => {}
        }

        debug!(path = %root, days = store.index.len(), "history store opened");
        Ok(store)
    }

    /// Appends turns to their days' logs and refreshes those days' index
    /// entries. Turns are grouped by UTC date and keep their order within
    /// each day. An empty batch does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] when a log append or the index rewrite
    /// fails.
    pub fn append(&mut self, turns: &[Turn], clock: &impl Clock) -> HistoryResult<()> {
        if turns.is_empty() {
            return Ok(());
        }

        let mut by_date: BTreeMap<NaiveDate, Vec<&Turn>> = BTreeMap::new();
        for turn in turns {
            by_date.entry(turn.date()).or_default().push(turn);
        }

        for (date, day_turns) in &by_date {
            files::append_log(&self.dir, *date, day_turns)?;
            self.refresh_entry(*date, clock)?;
        }
        files::write_index(&self.dir, &self.index)?;

        debug!(turns = turns.len(), days = by_date.len(), "history appended");
        Ok(())
    }

    /// Loads every readable turn recorded for `date`, in arrival order.
    ///
    /// A day without a log yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Io`] when the log exists but cannot be read.
    pub fn load(&self, date: NaiveDate) -> HistoryResult<Vec<Turn>> {
        files::read_log(&self.dir, date)
    }

    /// Returns all index entries, newest date first.
    #[must_use]
    pub fn list_dates(&self) -> Vec<DayIndexEntry> {
        self.index.values().rev().cloned().collect()
    }

    /// Returns index entries whose date, topics or summary contain `query`,
    /// ignoring case, newest first. A blank query lists every date.
    #[must_use]
    pub fn search_dates(&self, query: &str) -> Vec<DayIndexEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.list_dates();
        }

        self.index
            .values()
            .rev()
            .filter(|entry| entry.matches_text(&needle))
            .cloned()
            .collect()
    }

    /// Ranks past days against `query` and returns at most `limit`.
    ///
    /// A query without keywords returns the most recent days. Otherwise
    /// every day is scored by [`DayIndexEntry::recall_score`]; equal scores
    /// keep newest-first order.
    #[must_use]
    pub fn recall(&self, query: &str, limit: usize) -> Vec<DayIndexEntry> {
        let tokens = tokenize(query);
        let mut candidates = self.list_dates();
        if !tokens.is_empty() {
            candidates.sort_by_cached_key(|entry| Reverse(entry.recall_score(&tokens)));
        }
        candidates.truncate(limit);
        candidates
    }

    /// Rebuilds one day's index entry from its log and rewrites the index.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] when the log cannot be read or the index
    /// cannot be written.
    pub fn rebuild_index(
        &mut self,
        date: NaiveDate,
        clock: &impl Clock,
    ) -> HistoryResult<DayIndexEntry> {
        let entry = self.refresh_entry(date, clock)?;
        files::write_index(&self.dir, &self.index)?;
        Ok(entry)
    }

    /// Discards the index and rebuilds it from every day log on disk.
    ///
    /// Returns the number of days indexed.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] when the directory cannot be listed, a log
    /// cannot be read, or the index cannot be written.
    pub fn rebuild_all(&mut self, clock: &impl Clock) -> HistoryResult<usize> {
        let dates = files::log_dates(&self.dir)?;
        self.index.clear();
        for date in &dates {
            self.refresh_entry(*date, clock)?;
        }
        files::write_index(&self.dir, &self.index)?;

        info!(days = dates.len(), "history index rebuilt");
        Ok(dates.len())
    }

    /// Returns the index entry for `date`, if any.
    #[must_use]
    pub fn entry(&self, date: NaiveDate) -> Option<&DayIndexEntry> {
        self.index.get(&date)
    }

    /// Indexes day logs the index does not list yet, as left behind when
    /// a log append landed but the index rewrite did not.
    fn index_unlisted_days(&mut self, clock: &impl Clock) -> HistoryResult<()> {
        let unlisted: Vec<NaiveDate> = files::log_dates(&self.dir)?
            .into_iter()
            .filter(|date| !self.index.contains_key(date))
            .collect();
        if unlisted.is_empty() {
            return Ok(());
        }

        info!(days = unlisted.len(), "indexing day logs missing from the history index");
        for date in unlisted {
            self.refresh_entry(date, clock)?;
        }
        files::write_index(&self.dir, &self.index)
    }

    fn refresh_entry(&mut self, date: NaiveDate, clock: &impl Clock) -> HistoryResult<DayIndexEntry> {
        let log = files::read_log(&self.dir, date)?;
        let entry = DayIndexEntry::rebuild(date, &log, clock.utc());
        debug!(%date, topics = ?entry.topics(), messages = entry.messages(), "day index rebuilt");
        self.index.insert(date, entry.clone());
        Ok(entry)
    }
}
