//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into screen-level sessions.
//! - Keep UI/FFI layers decoupled from storage details.
//!
//! # Invariants
//! - Sessions receive their repository and clock through constructors;
//!   there is no process-wide store.

pub mod clock;
pub mod debounce;
pub mod editor_session;
pub mod history_query;
pub mod journal_repository;
pub mod reader_session;
pub mod reminder;
