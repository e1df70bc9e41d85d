//! Journal domain model.
//!
//! # Responsibility
//! - Define the records shared by the store, the sessions and the FFI layer.
//!
//! # Invariants
//! - Entries are identified by a store-assigned `EntryId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod entry;
pub mod mood;
pub mod preferences;
