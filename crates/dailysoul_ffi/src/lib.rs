//! Flutter bridge for the Daily Soul core.
//!
//! Dart bindings are generated from the functions in [`api`].

pub mod api;
