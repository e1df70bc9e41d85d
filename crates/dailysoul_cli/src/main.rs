//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `dailysoul_core` linkage.
//! - Print the plain-text export of a journal database on request.
//!
//! Usage: `dailysoul_cli` or `dailysoul_cli export <db_path>`.

use dailysoul_core::db::open_db;
use dailysoul_core::{entries_to_text, JournalRepository, JournalWorker, SqliteEntryStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => {
            println!("dailysoul_core ping={}", dailysoul_core::ping());
            println!("dailysoul_core version={}", dailysoul_core::core_version());
            ExitCode::SUCCESS
        }
        [command, db_path] if command == "export" => match export(db_path) {
            Ok(text) => {
                print!("{text}");
                ExitCode::SUCCESS
            }
            Err(message) => {
                eprintln!("export failed: {message}");
                ExitCode::FAILURE
            }
        },
        _ => {
            eprintln!("usage: dailysoul_cli [export <db_path>]");
            ExitCode::from(2)
        }
    }
}

/// Reads the journal on the database worker and renders it as text.
fn export(db_path: &str) -> Result<String, String> {
    let conn = open_db(db_path).map_err(|err| err.to_string())?;
    let worker = JournalWorker::start(conn).map_err(|err| err.to_string())?;
    let rendered = worker
        .submit(|conn| {
            JournalRepository::new(SqliteEntryStore::new(conn))
                .get_all()
                .map(|entries| entries_to_text(&entries))
        })
        .and_then(|handle| handle.wait())
        .map_err(|err| err.to_string())?;
    worker.shutdown().map_err(|err| err.to_string())?;
    rendered.map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::export;
    use dailysoul_core::db::open_db;
    use dailysoul_core::{EntryStore, Mood, NewEntry, SqliteEntryStore};

    #[test]
    fn export_renders_stored_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.db");
        {
            let conn = open_db(&path).unwrap();
            SqliteEntryStore::new(&conn)
                .insert(&NewEntry::new(
                    "2024-03-05",
                    Some(Mood::Calm),
                    "Quiet morning.",
                    1_709_625_600_000,
                ))
                .unwrap();
        }

        let text = export(path.to_str().unwrap()).unwrap();
        assert!(text.contains("Daily Soul Journal"));
        assert!(text.contains("Mood: Calm"));
        assert!(text.contains("Quiet morning."));
    }

    #[test]
    fn export_of_unreadable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(export(dir.path().to_str().unwrap()).is_err());
    }
}
