//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level journal functions to Dart via FRB.
//! - Map core results into flat response envelopes the UI can render.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - DB-backed functions are not `sync`; FRB runs them on its worker pool so
//!   the UI thread never waits on SQLite.
//! - Every DB-backed call opens its own connection and drops it on return.

use chrono::Local;
use dailysoul_core::db::open_db;
use dailysoul_core::format::dates::{
    day_label, day_number, header_string, month_name, parse_iso_date, read_date_string,
    section_header, time_string,
};
use dailysoul_core::{
    core_version as core_version_inner, entries_to_text, init_logging as init_logging_inner,
    ping as ping_inner, EditorSession, HistoryQuery, JournalEntry, JournalRepository, Mood,
    Preferences, PreferencesStore, ReaderSession, RepoError, RepoResult, SaveOutcome,
    SqliteEntryStore, SqlitePreferencesStore, SystemClock,
};
use log::warn;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;

const JOURNAL_DB_FILE_NAME: &str = "daily_soul_journal.db";
const JOURNAL_DB_PATH_ENV: &str = "DAILYSOUL_DB_PATH";
static JOURNAL_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One selectable mood for the mood screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodOption {
    /// Stable storage key (`joy|calm|neutral|low|heavy`).
    pub key: String,
    pub label: String,
    /// Material icon name for the picker tile.
    pub icon: String,
}

/// Moods in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn mood_options() -> Vec<MoodOption> {
    Mood::ALL
        .iter()
        .map(|mood| MoodOption {
            key: mood.key().to_string(),
            label: mood.label().to_string(),
            icon: mood.icon().to_string(),
        })
        .collect()
}

/// Journal entry as shown by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub id: i64,
    /// Canonical `yyyy-MM-dd` date.
    pub date: String,
    /// Mood storage key, `None` when no mood was picked.
    pub mood: Option<String>,
    pub mood_label: Option<String>,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
    /// e.g. `Tuesday, October 24, 2023`, local time.
    pub date_label: String,
    /// e.g. `7:30 AM`, local time.
    pub time_label: String,
    /// History group header, e.g. `September 2023`.
    pub section_header: String,
    pub month_name: String,
    /// Upper-case short weekday, e.g. `THU`.
    pub day_label: String,
    pub day_number: u32,
}

/// Response envelope for the journal home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodayResponse {
    pub ok: bool,
    /// Canonical `yyyy-MM-dd` key for today.
    pub today: String,
    /// e.g. `Monday, October 24`.
    pub header: String,
    pub prompt: String,
    pub entry: Option<EntryView>,
    pub message: String,
}

/// Response envelope for single-entry lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryResponse {
    pub ok: bool,
    /// `None` with `ok = true` means the entry does not exist.
    pub entry: Option<EntryView>,
    pub message: String,
}

/// Generic action response envelope for write calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected entry id, absent for skipped or failed writes.
    pub entry_id: Option<i64>,
    /// `inserted|updated|skipped|deleted`, empty on failure.
    pub outcome: String,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl EntryActionResponse {
    fn from_outcome(outcome: SaveOutcome) -> Self {
        let (entry_id, label, message) = match outcome {
            SaveOutcome::Inserted(id) => (Some(id), "inserted", "Entry saved."),
            SaveOutcome::Updated(id) => (Some(id), "updated", "Entry updated."),
            SaveOutcome::SkippedBlank => (None, "skipped", "Nothing to save."),
        };
        Self {
            ok: true,
            entry_id,
            outcome: label.to_string(),
            message: message.to_string(),
        }
    }

    fn deleted(id: i64) -> Self {
        Self {
            ok: true,
            entry_id: Some(id),
            outcome: "deleted".to_string(),
            message: "Entry deleted.".to_string(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entry_id: None,
            outcome: String::new(),
            message: message.into(),
        }
    }
}

/// Response envelope for the history screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryResponse {
    pub ok: bool,
    /// Newest first.
    pub entries: Vec<EntryView>,
    /// Distinct `yyyy-MM` months, most recent first.
    pub available_months: Vec<String>,
    /// `None` means all time.
    pub active_filter: Option<String>,
    pub message: String,
}

/// Response envelope for the plain-text export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResponse {
    pub ok: bool,
    pub text: String,
    pub entry_count: u32,
    pub message: String,
}

/// User settings as exchanged with the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferencesView {
    pub dark_mode: bool,
    pub notifications_on: bool,
    pub reminder_hour: u8,
    pub reminder_minute: u8,
    pub show_mood_screen: bool,
}

/// Response envelope for preference reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencesResponse {
    pub ok: bool,
    /// Stored settings; defaults when the call failed.
    pub preferences: PreferencesView,
    pub message: String,
}

/// Loads today's date, prompt and entry for the home screen.
///
/// # FFI contract
/// - Async (FRB pool), DB-backed.
/// - Never panics.
pub fn journal_today() -> TodayResponse {
    let result = with_journal(|conn| {
        let mut session = EditorSession::new(journal_repo(conn), SystemClock);
        session.load()
    });
    match result {
        Ok(snapshot) => TodayResponse {
            ok: true,
            header: header_for(&snapshot.today),
            today: snapshot.today,
            prompt: snapshot.prompt.to_string(),
            entry: snapshot.entry.as_ref().map(to_entry_view),
            message: String::new(),
        },
        Err(message) => TodayResponse {
            ok: false,
            today: String::new(),
            header: String::new(),
            prompt: String::new(),
            entry: None,
            message: report_failure("journal_today", message),
        },
    }
}

/// Saves today's entry with `content` and an optional mood key.
///
/// Creates today's entry on first save and updates it afterwards. Blank
/// content is reported as `skipped`.
///
/// # FFI contract
/// - Async (FRB pool), DB-backed.
/// - Never panics.
pub fn journal_save_today(content: String, mood: Option<String>) -> EntryActionResponse {
    let mood = match mood.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(key) => match Mood::from_key(key) {
            Some(mood) => Some(mood),
            None => {
                return EntryActionResponse::failure(report_failure(
                    "journal_save_today",
                    format!("unknown mood `{key}`"),
                ))
            }
        },
    };

    let result = with_journal(|conn| {
        let mut session = EditorSession::new(journal_repo(conn), SystemClock);
        session.load()?;
        session.set_mood(mood);
        session.content_changed(content);
        session.save()
    });
    match result {
        Ok(outcome) => EntryActionResponse::from_outcome(outcome),
        Err(message) => EntryActionResponse::failure(report_failure("journal_save_today", message)),
    }
}

/// Lists entries, optionally restricted to one `yyyy-MM` month.
///
/// # FFI contract
/// - Async (FRB pool), DB-backed.
/// - Never panics; malformed months come back as `ok = false`.
pub fn journal_history(month: Option<String>) -> HistoryResponse {
    let month = month
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    let result = with_journal(|conn| {
        let mut history = HistoryQuery::new(journal_repo(conn));
        history.load_all()?;
        history.filter_by_month(month.as_deref())
    });
    match result {
        Ok(snapshot) => HistoryResponse {
            ok: true,
            entries: snapshot.entries.iter().map(to_entry_view).collect(),
            available_months: snapshot.available_months,
            active_filter: snapshot.active_filter,
            message: String::new(),
        },
        Err(message) => HistoryResponse {
            ok: false,
            entries: Vec::new(),
            available_months: Vec::new(),
            active_filter: None,
            message: report_failure("journal_history", message),
        },
    }
}

/// Loads one entry for the reader screen.
pub fn journal_get(id: i64) -> EntryResponse {
    match with_journal(|conn| journal_repo(conn).get_by_id(id)) {
        Ok(entry) => EntryResponse {
            ok: true,
            message: if entry.is_some() {
                String::new()
            } else {
                "Entry not found.".to_string()
            },
            entry: entry.as_ref().map(to_entry_view),
        },
        Err(message) => EntryResponse {
            ok: false,
            entry: None,
            message: report_failure("journal_get", message),
        },
    }
}

/// Replaces the content of entry `id` from the reader screen.
pub fn journal_update_content(id: i64, content: String) -> EntryActionResponse {
    let result = with_journal(|conn| {
        match ReaderSession::open(journal_repo(conn), SystemClock, id)? {
            Some(mut session) => session.update_content(content),
            None => Err(RepoError::NotFound(id)),
        }
    });
    match result {
        Ok(outcome) => EntryActionResponse::from_outcome(outcome),
        Err(message) => {
            EntryActionResponse::failure(report_failure("journal_update_content", message))
        }
    }
}

/// Deletes entry `id`.
pub fn journal_delete(id: i64) -> EntryActionResponse {
    let result = with_journal(|conn| {
        match ReaderSession::open(journal_repo(conn), SystemClock, id)? {
            Some(session) => session.delete().map(|removed| removed.id),
            None => Err(RepoError::NotFound(id)),
        }
    });
    match result {
        Ok(id) => EntryActionResponse::deleted(id),
        Err(message) => EntryActionResponse::failure(report_failure("journal_delete", message)),
    }
}

/// Renders every entry as plain text for sharing.
pub fn journal_export() -> ExportResponse {
    match with_journal(|conn| journal_repo(conn).get_all()) {
        Ok(entries) => ExportResponse {
            ok: true,
            text: entries_to_text(&entries),
            entry_count: u32::try_from(entries.len()).unwrap_or(u32::MAX),
            message: export_message(entries.len()),
        },
        Err(message) => ExportResponse {
            ok: false,
            text: String::new(),
            entry_count: 0,
            message: report_failure("journal_export", message),
        },
    }
}

/// Reads all user settings, defaults filled in.
pub fn preferences_get() -> PreferencesResponse {
    preferences_response(
        "preferences_get",
        with_journal(|conn| SqlitePreferencesStore::new(conn).load()),
    )
}

/// Stores all user settings and returns what was persisted.
///
/// Out-of-range reminder times are rejected and nothing is written.
pub fn preferences_set(preferences: PreferencesView) -> PreferencesResponse {
    let wanted = Preferences::from(preferences);
    preferences_response(
        "preferences_set",
        with_journal(|conn| {
            let store = SqlitePreferencesStore::new(conn);
            store.save(&wanted)?;
            store.load()
        }),
    )
}

impl From<Preferences> for PreferencesView {
    fn from(value: Preferences) -> Self {
        Self {
            dark_mode: value.dark_mode,
            notifications_on: value.notifications_on,
            reminder_hour: value.reminder_hour,
            reminder_minute: value.reminder_minute,
            show_mood_screen: value.show_mood_screen,
        }
    }
}

impl From<PreferencesView> for Preferences {
    fn from(value: PreferencesView) -> Self {
        Self {
            dark_mode: value.dark_mode,
            notifications_on: value.notifications_on,
            reminder_hour: value.reminder_hour,
            reminder_minute: value.reminder_minute,
            show_mood_screen: value.show_mood_screen,
        }
    }
}

fn preferences_response(
    operation: &str,
    result: Result<Preferences, String>,
) -> PreferencesResponse {
    match result {
        Ok(preferences) => PreferencesResponse {
            ok: true,
            preferences: preferences.into(),
            message: String::new(),
        },
        Err(message) => PreferencesResponse {
            ok: false,
            preferences: Preferences::default().into(),
            message: report_failure(operation, message),
        },
    }
}

fn resolve_journal_db_path() -> PathBuf {
    JOURNAL_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(JOURNAL_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(JOURNAL_DB_FILE_NAME)
        })
        .clone()
}

fn with_journal<T>(f: impl FnOnce(&Connection) -> RepoResult<T>) -> Result<T, String> {
    let db_path = resolve_journal_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("journal DB open failed: {err}"))?;
    f(&conn).map_err(|err| err.to_string())
}

fn journal_repo(conn: &Connection) -> JournalRepository<SqliteEntryStore<'_>> {
    JournalRepository::new(SqliteEntryStore::new(conn))
}

fn report_failure(operation: &str, message: String) -> String {
    warn!("event=ffi_call module=ffi status=error operation={operation}");
    format!("{operation} failed: {message}")
}

fn header_for(iso_date: &str) -> String {
    parse_iso_date(iso_date)
        .map(header_string)
        .unwrap_or_else(|| iso_date.to_string())
}

fn to_entry_view(entry: &JournalEntry) -> EntryView {
    EntryView {
        id: entry.id,
        date: entry.date.clone(),
        mood: entry.mood.map(|mood| mood.key().to_string()),
        mood_label: entry.mood.map(|mood| mood.label().to_string()),
        content: entry.content.clone(),
        created_at: entry.created_at,
        updated_at: entry.updated_at,
        date_label: read_date_string(entry.created_at, &Local),
        time_label: time_string(entry.created_at, &Local),
        section_header: section_header(&entry.date),
        month_name: month_name(&entry.date),
        day_label: day_label(&entry.date),
        day_number: day_number(&entry.date),
    }
}

fn export_message(count: usize) -> String {
    match count {
        1 => "Exported 1 entry.".to_string(),
        n => format!("Exported {n} entries."),
    }
}
