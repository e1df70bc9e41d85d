//! Journal entry domain model.
//!
//! # Responsibility
//! - Define the persisted `JournalEntry` record and its not-yet-inserted
//!   counterpart `NewEntry`.
//! - Own the write-side validation rules shared by every store.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes afterwards.
//! - `date` is a canonical `yyyy-MM-dd` string.
//! - `content` is never blank once persisted.
//! - `updated_at >= created_at`, and every mutation strictly increases
//!   `updated_at`.

use crate::format::dates::parse_iso_date;
use crate::model::mood::Mood;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned entry identifier (SQLite rowid).
pub type EntryId = i64;

/// Validation errors for entry write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    /// Content is empty or whitespace-only.
    BlankContent,
    /// `date` is not a real calendar day in `yyyy-MM-dd` form.
    InvalidDate(String),
    /// `updated_at` is earlier than `created_at`.
    TimestampOrder { created_at: i64, updated_at: i64 },
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankContent => write!(f, "entry content must not be blank"),
            Self::InvalidDate(value) => {
                write!(f, "entry date `{value}` is not a yyyy-MM-dd calendar date")
            }
            Self::TimestampOrder {
                created_at,
                updated_at,
            } => write!(
                f,
                "updated_at ({updated_at}) must be >= created_at ({created_at})"
            ),
        }
    }
}

impl Error for EntryValidationError {}

/// One persisted journal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "JournalEntryWire")]
pub struct JournalEntry {
    pub id: EntryId,
    /// Canonical `yyyy-MM-dd` day this entry belongs to.
    pub date: String,
    pub mood: Option<Mood>,
    pub content: String,
    /// Unix epoch milliseconds, set once on insert.
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed on every mutation.
    pub updated_at: i64,
}

impl JournalEntry {
    /// Validates write-side invariants.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_fields(&self.date, &self.content, self.created_at, self.updated_at)
    }

    /// Returns the `yyyy-MM` month this entry belongs to.
    pub fn month_prefix(&self) -> &str {
        self.date.get(..7).unwrap_or(self.date.as_str())
    }

    /// Refreshes `updated_at` for a mutation happening at `now_ms`.
    ///
    /// The new value is strictly greater than the previous one even when the
    /// clock did not advance.
    pub fn touch(&mut self, now_ms: i64) {
        self.updated_at = now_ms.max(self.updated_at + 1);
    }
}

/// Entry that has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub date: String,
    pub mood: Option<Mood>,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl NewEntry {
    /// Builds a new entry with both timestamps set to `now_ms`.
    pub fn new(
        date: impl Into<String>,
        mood: Option<Mood>,
        content: impl Into<String>,
        now_ms: i64,
    ) -> Self {
        Self {
            date: date.into(),
            mood,
            content: content.into(),
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_fields(&self.date, &self.content, self.created_at, self.updated_at)
    }

    /// Attaches the store-assigned id.
    pub fn with_id(self, id: EntryId) -> JournalEntry {
        JournalEntry {
            id,
            date: self.date,
            mood: self.mood,
            content: self.content,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Returns whether `content` would be skipped by every save path.
pub fn is_blank(content: &str) -> bool {
    content.trim().is_empty()
}

fn validate_fields(
    date: &str,
    content: &str,
    created_at: i64,
    updated_at: i64,
) -> Result<(), EntryValidationError> {
    if parse_iso_date(date).is_none() {
        return Err(EntryValidationError::InvalidDate(date.to_string()));
    }
    if is_blank(content) {
        return Err(EntryValidationError::BlankContent);
    }
    if updated_at < created_at {
        return Err(EntryValidationError::TimestampOrder {
            created_at,
            updated_at,
        });
    }
    Ok(())
}

#[derive(Deserialize)]
struct JournalEntryWire {
    id: EntryId,
    date: String,
    mood: Option<Mood>,
    content: String,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<JournalEntryWire> for JournalEntry {
    type Error = EntryValidationError;

    fn try_from(value: JournalEntryWire) -> Result<Self, Self::Error> {
        let entry = JournalEntry {
            id: value.id,
            date: value.date,
            mood: value.mood,
            content: value.content,
            created_at: value.created_at,
            updated_at: value.updated_at,
        };
        entry.validate()?;
        Ok(entry)
    }
}
