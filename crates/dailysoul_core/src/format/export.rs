//! Plain-text journal export.
//!
//! Layout per entry:
//!
//! ```text
//! Date: Tuesday, October 24, 2023
//! Time: 7:30 AM
//! Mood: Calm
//!
//! <content>
//! ```
//!
//! Entries are separated by a divider line and rendered in the given order
//! (callers pass the newest-first `get_all` order).

use crate::format::dates::{read_date_string, time_string};
use crate::model::entry::JournalEntry;
use chrono::{Local, TimeZone};
use std::fmt::Display;

const BANNER_RULE: &str = "═══════════════════════════════";
const BANNER_TITLE: &str = "   Daily Soul Journal – Export";
const DIVIDER: &str = "───────────────────────────────";

/// Renders entries with timestamps in the host's local time zone.
pub fn entries_to_text(entries: &[JournalEntry]) -> String {
    entries_to_text_in(entries, &Local)
}

/// Renders entries with timestamps converted into `tz`.
pub fn entries_to_text_in<Tz>(entries: &[JournalEntry], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    push_line(&mut out, BANNER_RULE);
    push_line(&mut out, BANNER_TITLE);
    push_line(&mut out, BANNER_RULE);
    out.push('\n');

    for (index, entry) in entries.iter().enumerate() {
        if index > 0 {
            out.push('\n');
            push_line(&mut out, DIVIDER);
            out.push('\n');
        }
        push_line(
            &mut out,
            &format!("Date: {}", read_date_string(entry.created_at, tz)),
        );
        push_line(
            &mut out,
            &format!("Time: {}", time_string(entry.created_at, tz)),
        );
        if let Some(mood) = entry.mood {
            push_line(&mut out, &format!("Mood: {}", mood.label()));
        }
        out.push('\n');
        push_line(&mut out, &entry.content);
    }

    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
