//! Daily reminder contract.
//!
//! # Responsibility
//! - Describe what the platform alarm integration must provide.
//! - Translate preference changes into schedule/cancel calls.
//!
//! # Invariants
//! - A scheduled reminder fires once per day at the configured local time
//!   and survives restarts; that part lives in the platform implementation.

use crate::model::preferences::Preferences;
use chrono::{Duration, NaiveDateTime, NaiveTime};
use log::{info, warn};

/// Validated local time of day for the reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderTime {
    hour: u8,
    minute: u8,
}

impl ReminderTime {
    /// Returns `None` unless `hour` is 0-23 and `minute` is 0-59.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour <= 23 && minute <= 59).then_some(Self { hour, minute })
    }

    pub fn from_preferences(preferences: &Preferences) -> Option<Self> {
        Self::new(preferences.reminder_hour, preferences.reminder_minute)
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Next firing strictly after `now`: today at hh:mm, or tomorrow when
    /// that moment has already passed.
    pub fn next_fire_after(self, now: NaiveDateTime) -> NaiveDateTime {
        let time = NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or_default();
        let today = now.date().and_time(time);
        if today <= now {
            today + Duration::days(1)
        } else {
            today
        }
    }
}

/// Platform alarm integration consumed by the core.
pub trait ReminderScheduler {
    /// Replaces any existing reminder with a daily one at `time`.
    fn schedule_daily(&self, time: ReminderTime);
    /// Stops future firings.
    fn cancel(&self);
}

/// What `apply_reminder_preferences` asked the scheduler to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderAction {
    Scheduled(ReminderTime),
    Cancelled,
}

/// Schedules or cancels the reminder to match `preferences`.
pub fn apply_reminder_preferences(
    preferences: &Preferences,
    scheduler: &impl ReminderScheduler,
) -> ReminderAction {
    if !preferences.notifications_on {
        scheduler.cancel();
        info!("event=reminder_apply module=service status=ok action=cancel");
        return ReminderAction::Cancelled;
    }

    match ReminderTime::from_preferences(preferences) {
        Some(time) => {
            scheduler.schedule_daily(time);
            info!(
                "event=reminder_apply module=service status=ok action=schedule hour={} minute={}",
                time.hour, time.minute
            );
            ReminderAction::Scheduled(time)
        }
        None => {
            scheduler.cancel();
            warn!(
                "event=reminder_apply module=service status=error error_code=invalid_time hour={} minute={}",
                preferences.reminder_hour, preferences.reminder_minute
            );
            ReminderAction::Cancelled
        }
    }
}
