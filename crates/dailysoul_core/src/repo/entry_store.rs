//! Entry store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide durable CRUD over the `journal_entries` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `validate()` before any SQL mutation.
//! - Read paths reject invalid persisted state instead of masking it.
//! - List reads are ordered by `created_at DESC, id DESC`.

use crate::db::DbError;
use crate::format::dates::parse_iso_date;
use crate::model::entry::{EntryId, EntryValidationError, JournalEntry, NewEntry};
use crate::model::mood::Mood;
use log::debug;
use rusqlite::{params, Connection, Row, Rows};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    date,
    mood,
    content,
    created_at,
    updated_at
FROM journal_entries";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for journal persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntryValidationError),
    Db(DbError),
    NotFound(EntryId),
    InvalidData(String),
    InvalidMonthPrefix(String),
    InvalidPreference(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "journal entry not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::InvalidMonthPrefix(value) => {
                write!(f, "month prefix `{value}` is not in yyyy-MM form")
            }
            Self::InvalidPreference(message) => write!(f, "invalid preference: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for journal entries.
pub trait EntryStore {
    /// Persists a new entry and returns the assigned id.
    fn insert(&self, entry: &NewEntry) -> RepoResult<EntryId>;
    /// Overwrites the row matching `entry.id`. `created_at` is never rewritten.
    fn update(&self, entry: &JournalEntry) -> RepoResult<()>;
    /// Removes the row matching `entry.id`.
    fn delete(&self, entry: &JournalEntry) -> RepoResult<()>;
    fn get_by_id(&self, id: EntryId) -> RepoResult<Option<JournalEntry>>;
    /// Latest-created entry for `date`, if any.
    fn get_by_date(&self, date: &str) -> RepoResult<Option<JournalEntry>>;
    /// All entries, newest first.
    fn get_all(&self) -> RepoResult<Vec<JournalEntry>>;
    /// Entries whose `date` matches the SQL `LIKE` pattern, newest first.
    fn get_by_month(&self, date_pattern: &str) -> RepoResult<Vec<JournalEntry>>;
    fn count(&self) -> RepoResult<u64>;
}

impl<S: EntryStore + ?Sized> EntryStore for &S {
    fn insert(&self, entry: &NewEntry) -> RepoResult<EntryId> {
        (**self).insert(entry)
    }

    fn update(&self, entry: &JournalEntry) -> RepoResult<()> {
        (**self).update(entry)
    }

    fn delete(&self, entry: &JournalEntry) -> RepoResult<()> {
        (**self).delete(entry)
    }

    fn get_by_id(&self, id: EntryId) -> RepoResult<Option<JournalEntry>> {
        (**self).get_by_id(id)
    }

    fn get_by_date(&self, date: &str) -> RepoResult<Option<JournalEntry>> {
        (**self).get_by_date(date)
    }

    fn get_all(&self) -> RepoResult<Vec<JournalEntry>> {
        (**self).get_all()
    }

    fn get_by_month(&self, date_pattern: &str) -> RepoResult<Vec<JournalEntry>> {
        (**self).get_by_month(date_pattern)
    }

    fn count(&self) -> RepoResult<u64> {
        (**self).count()
    }
}

/// SQLite-backed entry store.
#[derive(Clone, Copy)]
pub struct SqliteEntryStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EntryStore for SqliteEntryStore<'_> {
    fn insert(&self, entry: &NewEntry) -> RepoResult<EntryId> {
        entry.validate()?;

        self.conn.execute(
            "INSERT INTO journal_entries (
                date,
                mood,
                content,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                entry.date.as_str(),
                entry.mood.map(Mood::key),
                entry.content.as_str(),
                entry.created_at,
                entry.updated_at,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("event=entry_insert module=repo status=ok entry_id={id}");
        Ok(id)
    }

    fn update(&self, entry: &JournalEntry) -> RepoResult<()> {
        entry.validate()?;

        let changed = self.conn.execute(
            "UPDATE journal_entries
             SET
                date = ?1,
                mood = ?2,
                content = ?3,
                updated_at = ?4
             WHERE id = ?5;",
            params![
                entry.date.as_str(),
                entry.mood.map(Mood::key),
                entry.content.as_str(),
                entry.updated_at,
                entry.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(entry.id));
        }

        debug!(
            "event=entry_update module=repo status=ok entry_id={}",
            entry.id
        );
        Ok(())
    }

    fn delete(&self, entry: &JournalEntry) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM journal_entries WHERE id = ?1;", [entry.id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(entry.id));
        }

        debug!(
            "event=entry_delete module=repo status=ok entry_id={}",
            entry.id
        );
        Ok(())
    }

    fn get_by_id(&self, id: EntryId) -> RepoResult<Option<JournalEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_entry_row(row)?)),
            None => Ok(None),
        }
    }

    fn get_by_date(&self, date: &str) -> RepoResult<Option<JournalEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ENTRY_SELECT_SQL}
             WHERE date = ?1
             ORDER BY created_at DESC, id DESC
             LIMIT 1;"
        ))?;
        let mut rows = stmt.query([date])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_entry_row(row)?)),
            None => Ok(None),
        }
    }

    fn get_all(&self) -> RepoResult<Vec<JournalEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ENTRY_SELECT_SQL} ORDER BY created_at DESC, id DESC;"
        ))?;
        let rows = stmt.query([])?;
        collect_entries(rows)
    }

    fn get_by_month(&self, date_pattern: &str) -> RepoResult<Vec<JournalEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ENTRY_SELECT_SQL}
             WHERE date LIKE ?1
             ORDER BY created_at DESC, id DESC;"
        ))?;
        let rows = stmt.query([date_pattern])?;
        collect_entries(rows)
    }

    fn count(&self) -> RepoResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM journal_entries;", [], |row| {
                row.get::<_, i64>(0)
            })?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }
}

fn collect_entries(mut rows: Rows<'_>) -> RepoResult<Vec<JournalEntry>> {
    let mut entries = Vec::new();
    while let Some(row) = rows.next()? {
        entries.push(parse_entry_row(row)?);
    }
    Ok(entries)
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<JournalEntry> {
    let id: EntryId = row.get("id")?;

    let date: String = row.get("date")?;
    if parse_iso_date(&date).is_none() {
        return Err(RepoError::InvalidData(format!(
            "invalid date `{date}` in journal_entries.date (id {id})"
        )));
    }

    let mood = match row.get::<_, Option<String>>("mood")? {
        Some(key) => Some(Mood::from_key(&key).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid mood `{key}` in journal_entries.mood (id {id})"
            ))
        })?),
        None => None,
    };

    Ok(JournalEntry {
        id,
        date,
        mood,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
