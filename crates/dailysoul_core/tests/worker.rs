use dailysoul_core::db::open_db_in_memory;
use dailysoul_core::{EntryStore, JournalWorker, NewEntry, SqliteEntryStore, WorkerError};
use std::sync::mpsc;
use std::time::Duration;

#[test]
fn jobs_run_in_submission_order_on_one_connection() {
    let worker = JournalWorker::start(open_db_in_memory().unwrap()).unwrap();

    let mut handles = Vec::new();
    for day in 1..=5 {
        handles.push(
            worker
                .submit(move |conn| {
                    SqliteEntryStore::new(conn).insert(&NewEntry::new(
                        format!("2024-03-{day:02}"),
                        None,
                        format!("day {day}"),
                        i64::from(day) * 1_000,
                    ))
                })
                .unwrap(),
        );
    }

    let ids: Vec<i64> = handles
        .into_iter()
        .map(|handle| handle.wait().unwrap().unwrap())
        .collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));

    let count = worker
        .submit(|conn| SqliteEntryStore::new(conn).count())
        .unwrap()
        .wait()
        .unwrap()
        .unwrap();
    assert_eq!(count, 5);
    worker.shutdown().unwrap();
}

#[test]
fn panicking_job_is_reported_and_worker_keeps_running() {
    let worker = JournalWorker::start(open_db_in_memory().unwrap()).unwrap();

    let failed = worker
        .submit(|_conn| -> u64 { panic!("boom") })
        .unwrap()
        .wait();
    assert!(matches!(failed, Err(WorkerError::JobPanicked)));

    let count = worker
        .submit(|conn| SqliteEntryStore::new(conn).count())
        .unwrap()
        .wait()
        .unwrap()
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn try_take_is_empty_until_the_job_finishes() {
    let worker = JournalWorker::start(open_db_in_memory().unwrap()).unwrap();
    let (release_tx, release_rx) = mpsc::channel::<()>();

    let handle = worker
        .submit(move |_conn| {
            release_rx.recv().unwrap();
            42
        })
        .unwrap();
    assert!(handle.try_take().is_none());

    release_tx.send(()).unwrap();
    let mut result = None;
    for _ in 0..200 {
        result = handle.try_take();
        if result.is_some() {
            break;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(matches!(result, Some(Ok(42))));
    assert!(matches!(
        handle.try_take(),
        Some(Err(WorkerError::Disconnected))
    ));
}

#[test]
fn shutdown_drains_queued_jobs() {
    let worker = JournalWorker::start(open_db_in_memory().unwrap()).unwrap();

    let handles: Vec<_> = (0..3)
        .map(|n| worker.submit(move |_conn| n * 2).unwrap())
        .collect();
    worker.shutdown().unwrap();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.wait().unwrap())
        .collect();
    assert_eq!(results, vec![0, 2, 4]);
}
