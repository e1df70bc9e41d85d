//! Date helpers shared by sessions, export and UI bindings.
//!
//! # Invariants
//! - The canonical storage key is `yyyy-MM-dd`, always zero padded and
//!   locale independent, so string order equals calendar order.
//! - Display helpers use English month/day names regardless of host locale.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Display;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso date regex"));
static MONTH_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("valid month prefix regex"));

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Parses a canonical `yyyy-MM-dd` key.
///
/// Returns `None` for unpadded forms (`2024-3-5`) and impossible days.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if !ISO_DATE_RE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).ok()
}

/// Returns whether `value` is a well-formed `yyyy-MM` month prefix.
pub fn is_month_prefix(value: &str) -> bool {
    MONTH_PREFIX_RE.is_match(value)
}

/// Home header, e.g. `Monday, October 24`.
pub fn header_string(date: NaiveDate) -> String {
    date.format("%A, %B %d").to_string()
}

/// Reader/export date line, e.g. `Tuesday, October 24, 2023`.
pub fn read_date_string<Tz>(epoch_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format_epoch(epoch_ms, tz, "%A, %B %d, %Y")
}

/// Time of day, e.g. `7:30 AM`.
pub fn time_string<Tz>(epoch_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format_epoch(epoch_ms, tz, "%-I:%M %p")
}

/// History section header, e.g. `September 2023`. Falls back to the input.
pub fn section_header(iso_date: &str) -> String {
    parse_iso_date(iso_date)
        .map(|date| date.format("%B %Y").to_string())
        .unwrap_or_else(|| iso_date.to_string())
}

/// Month name only, e.g. `September`. Falls back to the input.
pub fn month_name(iso_date: &str) -> String {
    parse_iso_date(iso_date)
        .map(|date| date.format("%B").to_string())
        .unwrap_or_else(|| iso_date.to_string())
}

/// Upper-case short weekday, e.g. `THU`. Empty for unparseable input.
pub fn day_label(iso_date: &str) -> String {
    parse_iso_date(iso_date)
        .map(|date| date.format("%a").to_string().to_uppercase())
        .unwrap_or_default()
}

/// Day of month (1-31). Zero for unparseable input.
pub fn day_number(iso_date: &str) -> u32 {
    parse_iso_date(iso_date).map_or(0, |date| date.day())
}

fn format_epoch<Tz>(epoch_ms: i64, tz: &Tz, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match tz.timestamp_millis_opt(epoch_ms).single() {
        Some(datetime) => format_datetime(&datetime, pattern),
        None => epoch_ms.to_string(),
    }
}

fn format_datetime<Tz>(datetime: &DateTime<Tz>, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    datetime.format(pattern).to_string()
}
