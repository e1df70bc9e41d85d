//! Text formatting for dates and plain-text export.
//!
//! # Responsibility
//! - Keep every user-visible date pattern in one place.
//! - Render journal entries into the share/export text layout.

pub mod dates;
pub mod export;
