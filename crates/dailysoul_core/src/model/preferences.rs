//! User preferences model.

use serde::{Deserialize, Serialize};

pub const KEY_DARK_MODE: &str = "dark_mode";
pub const KEY_NOTIFICATIONS_ON: &str = "notifications_on";
pub const KEY_REMINDER_HOUR: &str = "reminder_hour";
pub const KEY_REMINDER_MINUTE: &str = "reminder_minute";
pub const KEY_SHOW_MOOD_SCREEN: &str = "show_mood_screen";

pub const DEFAULT_REMINDER_HOUR: u8 = 20;
pub const DEFAULT_REMINDER_MINUTE: u8 = 0;

/// Snapshot of every user-facing setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub dark_mode: bool,
    /// Whether the daily reminder is scheduled.
    pub notifications_on: bool,
    /// 0-23, local time.
    pub reminder_hour: u8,
    /// 0-59.
    pub reminder_minute: u8,
    /// Whether the mood picker is shown before journaling.
    pub show_mood_screen: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: false,
            notifications_on: true,
            reminder_hour: DEFAULT_REMINDER_HOUR,
            reminder_minute: DEFAULT_REMINDER_MINUTE,
            show_mood_screen: true,
        }
    }
}
