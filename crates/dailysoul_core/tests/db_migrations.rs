use dailysoul_core::db::migrations::latest_version;
use dailysoul_core::db::{open_db, open_db_in_memory, DbError};
use dailysoul_core::{EntryStore, NewEntry, SqliteEntryStore};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "journal_entries");
    assert_table_exists(&conn, "preferences");
}

#[test]
fn reopening_a_file_database_keeps_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daily_soul_journal.db");

    let conn_first = open_db(&path).unwrap();
    let id = SqliteEntryStore::new(&conn_first)
        .insert(&NewEntry::new("2024-03-05", None, "kept", 1_000))
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let loaded = SqliteEntryStore::new(&conn_second)
        .get_by_id(id)
        .unwrap()
        .unwrap();
    assert_eq!(loaded.content, "kept");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failing_migration_reports_its_version_and_keeps_the_old_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clashing.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE leftovers (value TEXT);
         CREATE INDEX preferences ON leftovers (value);
         PRAGMA user_version = 1;",
    )
    .unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::Migration { version, .. } => assert_eq!(version, 2),
        other => panic!("unexpected error: {other}"),
    }

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn), 1);
}

#[test]
fn schema_rejects_updated_before_created() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO journal_entries (date, mood, content, created_at, updated_at)
         VALUES ('2024-03-05', NULL, 'text', 200, 100);",
        [],
    );
    assert!(result.is_err());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
