//! Persistence contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define storage traits for journal entries and preferences.
//! - Isolate SQLite query details from sessions and FFI callers.
//!
//! # Invariants
//! - Entry writes enforce `validate()` before persistence.
//! - Absent rows are `Ok(None)`; `NotFound` is only returned by writes
//!   that target a missing id.

pub mod entry_store;
pub mod preferences_repo;
