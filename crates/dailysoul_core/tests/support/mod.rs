#![allow(dead_code)]

use chrono::NaiveDate;
use dailysoul_core::{Clock, EntryId, EntryStore, JournalEntry, NewEntry, RepoResult};
use std::cell::{Cell, RefCell};

/// Clock that only moves when told to.
pub struct ManualClock {
    now_ms: Cell<i64>,
    today: Cell<NaiveDate>,
}

impl ManualClock {
    pub fn new(today: &str, now_ms: i64) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
            today: Cell::new(NaiveDate::parse_from_str(today, "%Y-%m-%d").unwrap()),
        }
    }

    pub fn advance_ms(&self, delta: i64) {
        self.now_ms.set(self.now_ms.get() + delta);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.get()
    }

    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}

/// Store wrapper that records every write before delegating.
pub struct RecordingStore<S> {
    inner: S,
    pub inserts: RefCell<Vec<String>>,
    pub updates: RefCell<Vec<String>>,
}

impl<S> RecordingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            inserts: RefCell::new(Vec::new()),
            updates: RefCell::new(Vec::new()),
        }
    }

    /// Number of insert and update calls seen so far.
    pub fn write_count(&self) -> usize {
        self.inserts.borrow().len() + self.updates.borrow().len()
    }
}

impl<S: EntryStore> EntryStore for RecordingStore<S> {
    fn insert(&self, entry: &NewEntry) -> RepoResult<EntryId> {
        self.inserts.borrow_mut().push(entry.content.clone());
        self.inner.insert(entry)
    }

    fn update(&self, entry: &JournalEntry) -> RepoResult<()> {
        self.updates.borrow_mut().push(entry.content.clone());
        self.inner.update(entry)
    }

    fn delete(&self, entry: &JournalEntry) -> RepoResult<()> {
        self.inner.delete(entry)
    }

    fn get_by_id(&self, id: EntryId) -> RepoResult<Option<JournalEntry>> {
        self.inner.get_by_id(id)
    }

    fn get_by_date(&self, date: &str) -> RepoResult<Option<JournalEntry>> {
        self.inner.get_by_date(date)
    }

    fn get_all(&self) -> RepoResult<Vec<JournalEntry>> {
        self.inner.get_all()
    }

    fn get_by_month(&self, date_pattern: &str) -> RepoResult<Vec<JournalEntry>> {
        self.inner.get_by_month(date_pattern)
    }

    fn count(&self) -> RepoResult<u64> {
        self.inner.count()
    }
}
