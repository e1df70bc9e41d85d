//! Core domain logic for the Daily Soul journal.
//! This crate is the single source of truth for journal invariants.

pub mod db;
pub mod format;
pub mod logging;
pub mod model;
pub mod prompt;
pub mod repo;
pub mod service;
pub mod worker;

pub use format::export::{entries_to_text, entries_to_text_in};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::entry::{EntryId, EntryValidationError, JournalEntry, NewEntry};
pub use model::mood::Mood;
pub use model::preferences::Preferences;
pub use repo::entry_store::{EntryStore, RepoError, RepoResult, SqliteEntryStore};
pub use repo::preferences_repo::{PreferencesStore, SqlitePreferencesStore};
pub use service::clock::{Clock, SystemClock};
pub use service::debounce::{Debouncer, AUTO_SAVE_DELAY};
pub use service::editor_session::{EditorPhase, EditorSession, EditorSnapshot, SaveOutcome};
pub use service::history_query::{HistoryQuery, HistorySnapshot};
pub use service::journal_repository::JournalRepository;
pub use service::reader_session::ReaderSession;
pub use service::reminder::{
    apply_reminder_preferences, ReminderAction, ReminderScheduler, ReminderTime,
};
pub use worker::{JobHandle, JournalWorker, WorkerError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
