//! Preferences key-value store.
//!
//! # Responsibility
//! - Persist user settings in the `preferences` table next to the journal.
//! - Fill in defaults for keys that were never written.
//!
//! # Invariants
//! - Values are stored as text: `true|false` for flags, decimal for numbers.
//! - Reminder hour is 0-23 and minute is 0-59 on every write path.

use crate::model::preferences::{
    Preferences, KEY_DARK_MODE, KEY_NOTIFICATIONS_ON, KEY_REMINDER_HOUR, KEY_REMINDER_MINUTE,
    KEY_SHOW_MOOD_SCREEN,
};
use crate::repo::entry_store::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Storage contract for user preferences.
pub trait PreferencesStore {
    /// Reads all settings, using defaults for missing keys.
    fn load(&self) -> RepoResult<Preferences>;
    /// Writes every setting.
    fn save(&self, preferences: &Preferences) -> RepoResult<()>;
    fn set_dark_mode(&self, value: bool) -> RepoResult<()>;
    fn set_notifications_on(&self, value: bool) -> RepoResult<()>;
    fn set_reminder_time(&self, hour: u8, minute: u8) -> RepoResult<()>;
    fn set_show_mood_screen(&self, value: bool) -> RepoResult<()>;
}

/// SQLite-backed preferences store.
#[derive(Clone, Copy)]
pub struct SqlitePreferencesStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePreferencesStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn read(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }

    fn read_bool(&self, key: &str, default: bool) -> RepoResult<bool> {
        match self.read(key)?.as_deref() {
            None => Ok(default),
            Some("true") => Ok(true),
            Some("false") => Ok(false),
            Some(other) => Err(RepoError::InvalidData(format!(
                "invalid boolean `{other}` for preference `{key}`"
            ))),
        }
    }

    fn read_bounded(&self, key: &str, default: u8, max: u8) -> RepoResult<u8> {
        let Some(raw) = self.read(key)? else {
            return Ok(default);
        };
        match raw.parse::<u8>() {
            Ok(value) if value <= max => Ok(value),
            _ => Err(RepoError::InvalidData(format!(
                "invalid value `{raw}` for preference `{key}` (expected 0-{max})"
            ))),
        }
    }
}

impl PreferencesStore for SqlitePreferencesStore<'_> {
    fn load(&self) -> RepoResult<Preferences> {
        let defaults = Preferences::default();
        Ok(Preferences {
            dark_mode: self.read_bool(KEY_DARK_MODE, defaults.dark_mode)?,
            notifications_on: self.read_bool(KEY_NOTIFICATIONS_ON, defaults.notifications_on)?,
            reminder_hour: self.read_bounded(KEY_REMINDER_HOUR, defaults.reminder_hour, 23)?,
            reminder_minute: self.read_bounded(
                KEY_REMINDER_MINUTE,
                defaults.reminder_minute,
                59,
            )?,
            show_mood_screen: self.read_bool(KEY_SHOW_MOOD_SCREEN, defaults.show_mood_screen)?,
        })
    }

    fn save(&self, preferences: &Preferences) -> RepoResult<()> {
        validate_reminder_time(preferences.reminder_hour, preferences.reminder_minute)?;
        let tx = self.conn.unchecked_transaction()?;
        {
            let store = SqlitePreferencesStore::new(&tx);
            store.write(KEY_DARK_MODE, bool_to_text(preferences.dark_mode))?;
            store.write(
                KEY_NOTIFICATIONS_ON,
                bool_to_text(preferences.notifications_on),
            )?;
            store.write(KEY_REMINDER_HOUR, &preferences.reminder_hour.to_string())?;
            store.write(
                KEY_REMINDER_MINUTE,
                &preferences.reminder_minute.to_string(),
            )?;
            store.write(
                KEY_SHOW_MOOD_SCREEN,
                bool_to_text(preferences.show_mood_screen),
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn set_dark_mode(&self, value: bool) -> RepoResult<()> {
        self.write(KEY_DARK_MODE, bool_to_text(value))
    }

    fn set_notifications_on(&self, value: bool) -> RepoResult<()> {
        self.write(KEY_NOTIFICATIONS_ON, bool_to_text(value))
    }

    fn set_reminder_time(&self, hour: u8, minute: u8) -> RepoResult<()> {
        validate_reminder_time(hour, minute)?;
        let tx = self.conn.unchecked_transaction()?;
        {
            let store = SqlitePreferencesStore::new(&tx);
            store.write(KEY_REMINDER_HOUR, &hour.to_string())?;
            store.write(KEY_REMINDER_MINUTE, &minute.to_string())?;
        }
        tx.commit()?;
        Ok(())
    }

    fn set_show_mood_screen(&self, value: bool) -> RepoResult<()> {
        self.write(KEY_SHOW_MOOD_SCREEN, bool_to_text(value))
    }
}

fn validate_reminder_time(hour: u8, minute: u8) -> RepoResult<()> {
    if hour > 23 {
        return Err(RepoError::InvalidPreference(format!(
            "reminder_hour must be 0-23, got {hour}"
        )));
    }
    if minute > 59 {
        return Err(RepoError::InvalidPreference(format!(
            "reminder_minute must be 0-59, got {minute}"
        )));
    }
    Ok(())
}

fn bool_to_text(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
