//! Cancellable delayed task used for auto-save.
//!
//! The debouncer holds at most one pending payload. Scheduling again
//! replaces the payload and pushes the deadline out; the owner drives it by
//! calling `poll` from its event loop, so no timer thread is involved.

use std::time::{Duration, Instant};

/// Quiet period after the last keystroke before the editor auto-saves.
pub const AUTO_SAVE_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
struct Pending<T> {
    due_at: Instant,
    payload: T,
}

/// Single-slot delayed task.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedules `payload` to become due `delay` after `now`.
    ///
    /// Returns `true` when a pending payload was replaced.
    pub fn schedule(&mut self, payload: T, now: Instant) -> bool {
        let replaced = self.pending.is_some();
        self.pending = Some(Pending {
            due_at: now + self.delay,
            payload,
        });
        replaced
    }

    /// Drops the pending payload without running it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.payload)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn due_at(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.due_at)
    }

    /// Takes the payload once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| now >= pending.due_at);
        if due {
            self.cancel()
        } else {
            None
        }
    }

    /// Takes the payload immediately, ignoring the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.cancel()
    }
}
