//! Single-entry reader/editor session.
//!
//! A session only exists for an id that resolved to an entry; `open`
//! returning `None` tells the consumer to close the screen.

use crate::model::entry::{is_blank, EntryId, JournalEntry};
use crate::repo::entry_store::{EntryStore, RepoResult};
use crate::service::clock::{Clock, SystemClock};
use crate::service::editor_session::SaveOutcome;
use crate::service::journal_repository::JournalRepository;
use log::info;

pub struct ReaderSession<S: EntryStore, C: Clock = SystemClock> {
    repo: JournalRepository<S>,
    clock: C,
    entry: JournalEntry,
}

impl<S: EntryStore, C: Clock> ReaderSession<S, C> {
    /// Loads entry `id`. `Ok(None)` means there is nothing to show.
    pub fn open(repo: JournalRepository<S>, clock: C, id: EntryId) -> RepoResult<Option<Self>> {
        let Some(entry) = repo.get_by_id(id)? else {
            info!("event=reader_open module=service status=not_found entry_id={id}");
            return Ok(None);
        };
        Ok(Some(Self { repo, clock, entry }))
    }

    pub fn entry(&self) -> &JournalEntry {
        &self.entry
    }

    /// Replaces the content, refreshes `updated_at` and persists.
    ///
    /// Blank text is skipped and the stored entry stays as it was.
    pub fn update_content(&mut self, text: impl Into<String>) -> RepoResult<SaveOutcome> {
        let text = text.into();
        if is_blank(&text) {
            return Ok(SaveOutcome::SkippedBlank);
        }

        let mut updated = self.entry.clone();
        updated.content = text;
        updated.touch(self.clock.now_ms());
        self.repo.update(&updated)?;
        self.entry = updated;
        info!(
            "event=reader_update module=service status=ok entry_id={}",
            self.entry.id
        );
        Ok(SaveOutcome::Updated(self.entry.id))
    }

    /// Deletes the entry and ends the session, returning what was removed.
    pub fn delete(self) -> RepoResult<JournalEntry> {
        self.repo.delete(&self.entry)?;
        info!(
            "event=reader_delete module=service status=ok entry_id={}",
            self.entry.id
        );
        Ok(self.entry)
    }
}
