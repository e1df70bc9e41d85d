//! History list and month filter.
//!
//! # Responsibility
//! - Load the entry list, either complete or for one `yyyy-MM` month.
//! - Derive the month filter options from the complete list.
//!
//! # Invariants
//! - Available months keep first-seen order over the newest-first list, so
//!   the most recent month comes first and each month appears once.
//! - `refresh` re-applies whichever filter was last applied successfully.

use crate::model::entry::JournalEntry;
use crate::repo::entry_store::{EntryStore, RepoResult};
use crate::service::journal_repository::JournalRepository;
use log::debug;
use std::collections::HashSet;

/// Immutable view of the history list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistorySnapshot {
    /// Entries, newest first.
    pub entries: Vec<JournalEntry>,
    /// Distinct `yyyy-MM` months, most recent first.
    pub available_months: Vec<String>,
    /// `None` means all time.
    pub active_filter: Option<String>,
}

impl HistorySnapshot {
    /// Whether the empty state should be shown.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// History screen query state.
pub struct HistoryQuery<S: EntryStore> {
    repo: JournalRepository<S>,
    state: HistorySnapshot,
}

impl<S: EntryStore> HistoryQuery<S> {
    pub fn new(repo: JournalRepository<S>) -> Self {
        Self {
            repo,
            state: HistorySnapshot::default(),
        }
    }

    /// Loads every entry and recomputes the month options.
    pub fn load_all(&mut self) -> RepoResult<HistorySnapshot> {
        let entries = self.repo.get_all()?;
        self.state.available_months = distinct_months(&entries);
        self.state.entries = entries;
        self.state.active_filter = None;
        debug!(
            "event=history_load module=service status=ok entries={} months={}",
            self.state.entries.len(),
            self.state.available_months.len()
        );
        Ok(self.snapshot())
    }

    /// Applies a month filter; `None` shows all time.
    ///
    /// An invalid prefix leaves the current state untouched.
    pub fn filter_by_month(&mut self, month_prefix: Option<&str>) -> RepoResult<HistorySnapshot> {
        let Some(prefix) = month_prefix else {
            return self.load_all();
        };
        let entries = self.repo.get_by_month(prefix)?;
        self.state.entries = entries;
        self.state.active_filter = Some(prefix.to_string());
        debug!(
            "event=history_filter module=service status=ok entries={}",
            self.state.entries.len()
        );
        Ok(self.snapshot())
    }

    /// Re-runs the last applied filter, e.g. after returning from the reader.
    pub fn refresh(&mut self) -> RepoResult<HistorySnapshot> {
        let active = self.state.active_filter.clone();
        self.filter_by_month(active.as_deref())
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        self.state.clone()
    }
}

/// Distinct `yyyy-MM` months in first-seen order.
pub fn distinct_months(entries: &[JournalEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .map(JournalEntry::month_prefix)
        .filter(|month| seen.insert(*month))
        .map(str::to_string)
        .collect()
}
