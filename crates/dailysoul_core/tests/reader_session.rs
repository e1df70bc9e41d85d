mod support;

use dailysoul_core::db::open_db_in_memory;
use dailysoul_core::{
    EntryStore, JournalRepository, Mood, NewEntry, ReaderSession, SaveOutcome, SqliteEntryStore,
};
use support::ManualClock;

const NOW_MS: i64 = 1_709_625_600_000;

#[test]
fn open_missing_id_yields_no_session() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new("2024-03-05", NOW_MS);
    let session =
        ReaderSession::open(JournalRepository::new(SqliteEntryStore::new(&conn)), &clock, 9)
            .unwrap();
    assert!(session.is_none());
}

#[test]
fn update_content_persists_and_refreshes_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteEntryStore::new(&conn);
    let id = store
        .insert(&NewEntry::new("2024-03-01", Some(Mood::Neutral), "old", NOW_MS))
        .unwrap();
    let clock = ManualClock::new("2024-03-05", NOW_MS + 60_000);

    let mut session = ReaderSession::open(JournalRepository::new(store), &clock, id)
        .unwrap()
        .unwrap();
    assert_eq!(session.entry().content, "old");

    assert_eq!(
        session.update_content("rewritten").unwrap(),
        SaveOutcome::Updated(id)
    );
    assert_eq!(session.entry().content, "rewritten");

    let stored = store.get_by_id(id).unwrap().unwrap();
    assert_eq!(stored.content, "rewritten");
    assert_eq!(stored.date, "2024-03-01");
    assert_eq!(stored.mood, Some(Mood::Neutral));
    assert_eq!(stored.created_at, NOW_MS);
    assert_eq!(stored.updated_at, NOW_MS + 60_000);
}

#[test]
fn update_with_stalled_clock_still_moves_updated_at_forward() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteEntryStore::new(&conn);
    let id = store
        .insert(&NewEntry::new("2024-03-01", None, "old", NOW_MS))
        .unwrap();
    let clock = ManualClock::new("2024-03-01", NOW_MS);

    let mut session = ReaderSession::open(JournalRepository::new(store), &clock, id)
        .unwrap()
        .unwrap();
    session.update_content("new").unwrap();

    assert!(store.get_by_id(id).unwrap().unwrap().updated_at > NOW_MS);
}

#[test]
fn blank_update_is_skipped() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteEntryStore::new(&conn);
    let id = store
        .insert(&NewEntry::new("2024-03-01", None, "keep me", NOW_MS))
        .unwrap();
    let clock = ManualClock::new("2024-03-05", NOW_MS + 1);

    let mut session = ReaderSession::open(JournalRepository::new(store), &clock, id)
        .unwrap()
        .unwrap();
    assert_eq!(
        session.update_content("  ").unwrap(),
        SaveOutcome::SkippedBlank
    );

    let stored = store.get_by_id(id).unwrap().unwrap();
    assert_eq!(stored.content, "keep me");
    assert_eq!(stored.updated_at, NOW_MS);
}

#[test]
fn delete_removes_entry_and_returns_it() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteEntryStore::new(&conn);
    let id = store
        .insert(&NewEntry::new("2024-03-01", None, "gone soon", NOW_MS))
        .unwrap();
    let clock = ManualClock::new("2024-03-05", NOW_MS);

    let session = ReaderSession::open(JournalRepository::new(store), &clock, id)
        .unwrap()
        .unwrap();
    let removed = session.delete().unwrap();

    assert_eq!(removed.id, id);
    assert!(store.get_by_id(id).unwrap().is_none());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn deleting_entry_removed_elsewhere_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteEntryStore::new(&conn);
    let id = store
        .insert(&NewEntry::new("2024-03-01", None, "raced", NOW_MS))
        .unwrap();
    let clock = ManualClock::new("2024-03-05", NOW_MS);

    let session = ReaderSession::open(JournalRepository::new(store), &clock, id)
        .unwrap()
        .unwrap();
    let entry = store.get_by_id(id).unwrap().unwrap();
    store.delete(&entry).unwrap();

    assert!(matches!(
        session.delete(),
        Err(dailysoul_core::RepoError::NotFound(missing)) if missing == id
    ));
}
