//! Journal repository facade.
//!
//! # Responsibility
//! - Present use-case named operations over any `EntryStore`.
//! - Translate `yyyy-MM` month prefixes into the store's `LIKE` pattern.
//!
//! # Invariants
//! - Adds no business rules beyond pass-through and prefix translation.
//! - Month prefixes are validated before they reach SQL.

use crate::format::dates::is_month_prefix;
use crate::model::entry::{EntryId, JournalEntry, NewEntry};
use crate::repo::entry_store::{EntryStore, RepoError, RepoResult};

/// Facade used by sessions; the store can be swapped for a test double.
#[derive(Clone)]
pub struct JournalRepository<S: EntryStore> {
    store: S,
}

impl<S: EntryStore> JournalRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persists a new entry (first save of the day).
    pub fn save(&self, entry: &NewEntry) -> RepoResult<EntryId> {
        self.store.insert(entry)
    }

    /// Overwrites an existing entry.
    pub fn update(&self, entry: &JournalEntry) -> RepoResult<()> {
        self.store.update(entry)
    }

    /// Removes an entry permanently.
    pub fn delete(&self, entry: &JournalEntry) -> RepoResult<()> {
        self.store.delete(entry)
    }

    pub fn get_by_id(&self, id: EntryId) -> RepoResult<Option<JournalEntry>> {
        self.store.get_by_id(id)
    }

    /// Loads the entry for `today` (canonical `yyyy-MM-dd`), if one exists.
    pub fn get_today_entry(&self, today: &str) -> RepoResult<Option<JournalEntry>> {
        self.store.get_by_date(today)
    }

    /// Full history, newest first.
    pub fn get_all(&self) -> RepoResult<Vec<JournalEntry>> {
        self.store.get_all()
    }

    /// Entries of one month, e.g. `"2023-09"`, newest first.
    pub fn get_by_month(&self, month_prefix: &str) -> RepoResult<Vec<JournalEntry>> {
        if !is_month_prefix(month_prefix) {
            return Err(RepoError::InvalidMonthPrefix(month_prefix.to_string()));
        }
        self.store.get_by_month(&format!("{month_prefix}%"))
    }

    /// Total entry count; zero means the empty state is shown.
    pub fn count(&self) -> RepoResult<u64> {
        self.store.count()
    }
}
