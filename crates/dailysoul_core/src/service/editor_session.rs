//! Today's entry editor session.
//!
//! # Responsibility
//! - Load or create the entry for the current day.
//! - Debounce keystrokes into auto-saves and merge the selected mood.
//!
//! # Invariants
//! - Blank drafts are never persisted; the save is skipped silently.
//! - At most one debounced save is pending at any time.
//! - Closing or dropping the session flushes a pending save before returning.
//! - The first save looks up today's entry if `load` has not, so a day never
//!   gets a second row from this session.
//! - If today's entry vanished underneath the session, the next save
//!   inserts a fresh one instead of failing.
//! - A save never clears an existing mood; only a selected mood replaces it.

use crate::format::dates::format_iso_date;
use crate::model::entry::{is_blank, EntryId, JournalEntry, NewEntry};
use crate::model::mood::Mood;
use crate::prompt::prompt_for;
use crate::repo::entry_store::{EntryStore, RepoError, RepoResult};
use crate::service::clock::{Clock, SystemClock};
use crate::service::debounce::{Debouncer, AUTO_SAVE_DELAY};
use crate::service::journal_repository::JournalRepository;
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// Lifecycle phase of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    /// Today's entry has not been looked up yet.
    Loading,
    /// No entry exists for today.
    Empty,
    /// An entry for today was found and seeded into the draft.
    Loaded,
    /// The user has typed since loading.
    Editing,
}

/// Result of one save attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted(EntryId),
    Updated(EntryId),
    /// Content was blank; nothing was written.
    SkippedBlank,
}

/// Immutable view of the editor state for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSnapshot {
    pub phase: EditorPhase,
    /// Canonical `yyyy-MM-dd` date being edited.
    pub today: String,
    pub prompt: &'static str,
    /// Persisted entry, `None` until the first save of the day.
    pub entry: Option<JournalEntry>,
    pub draft: String,
    pub char_count: usize,
    pub selected_mood: Option<Mood>,
    pub save_pending: bool,
}

/// Editor session bound to one calendar day.
pub struct EditorSession<S: EntryStore, C: Clock = SystemClock> {
    repo: JournalRepository<S>,
    clock: C,
    today: String,
    prompt: &'static str,
    phase: EditorPhase,
    entry: Option<JournalEntry>,
    draft: String,
    selected_mood: Option<Mood>,
    /// Whether today's entry has been looked up in the store.
    looked_up: bool,
    debouncer: Debouncer<String>,
}

impl<S: EntryStore, C: Clock> EditorSession<S, C> {
    /// Creates a session with the default auto-save delay.
    pub fn new(repo: JournalRepository<S>, clock: C) -> Self {
        Self::with_delay(repo, clock, AUTO_SAVE_DELAY)
    }

    pub fn with_delay(repo: JournalRepository<S>, clock: C, delay: Duration) -> Self {
        let day = clock.today();
        Self {
            repo,
            today: format_iso_date(day),
            prompt: prompt_for(day),
            clock,
            phase: EditorPhase::Loading,
            entry: None,
            draft: String::new(),
            selected_mood: None,
            looked_up: false,
            debouncer: Debouncer::new(delay),
        }
    }

    /// Looks up today's entry and leaves the `Loading` phase.
    pub fn load(&mut self) -> RepoResult<EditorSnapshot> {
        let existing = self.repo.get_today_entry(&self.today)?;
        if self.phase == EditorPhase::Loading {
            self.draft = existing
                .as_ref()
                .map(|entry| entry.content.clone())
                .unwrap_or_default();
            self.phase = if existing.is_some() {
                EditorPhase::Loaded
            } else {
                EditorPhase::Empty
            };
        }
        self.entry = existing;
        self.looked_up = true;
        debug!(
            "event=editor_load module=service status=ok found={}",
            self.entry.is_some()
        );
        Ok(self.snapshot())
    }

    /// Records the mood picked on the mood screen; applied on the next save.
    pub fn set_mood(&mut self, mood: Option<Mood>) -> EditorSnapshot {
        self.selected_mood = mood;
        self.snapshot()
    }

    /// Records a content change and reschedules the auto-save.
    pub fn content_changed(&mut self, text: impl Into<String>) -> EditorSnapshot {
        self.content_changed_at(text, Instant::now())
    }

    pub fn content_changed_at(&mut self, text: impl Into<String>, now: Instant) -> EditorSnapshot {
        self.draft = text.into();
        self.phase = EditorPhase::Editing;
        self.debouncer.schedule(self.draft.clone(), now);
        self.snapshot()
    }

    /// Runs the debounced save if its quiet period has elapsed.
    pub fn poll(&mut self) -> RepoResult<Option<SaveOutcome>> {
        self.poll_at(Instant::now())
    }

    pub fn poll_at(&mut self, now: Instant) -> RepoResult<Option<SaveOutcome>> {
        match self.debouncer.poll(now) {
            Some(content) => self.persist(content).map(Some),
            None => Ok(None),
        }
    }

    /// When the pending auto-save becomes due, if any.
    pub fn next_save_due(&self) -> Option<Instant> {
        self.debouncer.due_at()
    }

    /// Saves the current draft now, cancelling any pending auto-save.
    pub fn save(&mut self) -> RepoResult<SaveOutcome> {
        self.debouncer.cancel();
        self.persist(self.draft.clone())
    }

    /// Flushes a pending auto-save and ends the session.
    pub fn close(mut self) -> RepoResult<Option<SaveOutcome>> {
        self.flush_pending()
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            phase: self.phase,
            today: self.today.clone(),
            prompt: self.prompt,
            entry: self.entry.clone(),
            draft: self.draft.clone(),
            char_count: self.draft.chars().count(),
            selected_mood: self.selected_mood,
            save_pending: self.debouncer.is_pending(),
        }
    }

    fn flush_pending(&mut self) -> RepoResult<Option<SaveOutcome>> {
        match self.debouncer.flush() {
            Some(content) => self.persist(content).map(Some),
            None => Ok(None),
        }
    }

    fn persist(&mut self, content: String) -> RepoResult<SaveOutcome> {
        if is_blank(&content) {
            debug!("event=editor_save module=service status=skipped reason=blank_content");
            return Ok(SaveOutcome::SkippedBlank);
        }

        if !self.looked_up {
            self.entry = self.repo.get_today_entry(&self.today)?;
            self.looked_up = true;
        }

        let now_ms = self.clock.now_ms();
        let outcome = match self.entry.take() {
            Some(mut updated) => {
                updated.content = content;
                if let Some(mood) = self.selected_mood {
                    updated.mood = Some(mood);
                }
                updated.touch(now_ms);
                match self.repo.update(&updated) {
                    Ok(()) => {
                        let id = updated.id;
                        self.entry = Some(updated);
                        SaveOutcome::Updated(id)
                    }
                    Err(RepoError::NotFound(id)) => {
                        warn!(
                            "event=editor_save module=service status=retry reason=entry_missing entry_id={id}"
                        );
                        self.insert_today(updated.mood, updated.content, now_ms)?
                    }
                    Err(err) => {
                        self.entry = Some(updated);
                        return Err(err);
                    }
                }
            }
            None => self.insert_today(self.selected_mood, content, now_ms)?,
        };

        info!(
            "event=editor_save module=service status=ok outcome={} chars={}",
            outcome_label(outcome),
            self.entry.as_ref().map_or(0, |entry| entry.content.chars().count())
        );
        Ok(outcome)
    }

    fn insert_today(
        &mut self,
        mood: Option<Mood>,
        content: String,
        now_ms: i64,
    ) -> RepoResult<SaveOutcome> {
        let new_entry = NewEntry::new(self.today.as_str(), mood, content, now_ms);
        let id = self.repo.save(&new_entry)?;
        self.entry = Some(new_entry.with_id(id));
        Ok(SaveOutcome::Inserted(id))
    }
}

impl<S: EntryStore, C: Clock> Drop for EditorSession<S, C> {
    fn drop(&mut self) {
        if let Err(err) = self.flush_pending() {
            warn!(
                "event=editor_close module=service status=error error_code=flush_failed error={err}"
            );
        }
    }
}

fn outcome_label(outcome: SaveOutcome) -> &'static str {
    match outcome {
        SaveOutcome::Inserted(_) => "inserted",
        SaveOutcome::Updated(_) => "updated",
        SaveOutcome::SkippedBlank => "skipped",
    }
}
