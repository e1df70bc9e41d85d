//! Background database worker.
//!
//! # Responsibility
//! - Own the SQLite connection on a dedicated thread so persistence never
//!   blocks the interactive thread.
//! - Run submitted jobs one at a time, in submission order.
//!
//! # Invariants
//! - The connection is only touched from the worker thread.
//! - A panicking job is reported to its waiter and does not stop the worker.
//! - Shutdown drains already queued jobs before the thread exits.

use log::{error, info};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::JoinHandle;

const WORKER_THREAD_NAME: &str = "dailysoul-db";

type Job = Box<dyn FnOnce(&Connection) + Send + 'static>;

/// Worker lifecycle and job delivery errors.
#[derive(Debug)]
pub enum WorkerError {
    /// The worker thread could not be started.
    Spawn(std::io::Error),
    /// The worker is gone, so the job result will never arrive.
    Disconnected,
    /// The job panicked while running.
    JobPanicked,
}

impl Display for WorkerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spawn(err) => write!(f, "failed to start database worker: {err}"),
            Self::Disconnected => write!(f, "database worker is not running"),
            Self::JobPanicked => write!(f, "database job panicked"),
        }
    }
}

impl Error for WorkerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Spawn(err) => Some(err),
            _ => None,
        }
    }
}

/// Pending result of a submitted job.
pub struct JobHandle<T> {
    receiver: Receiver<Result<T, WorkerError>>,
}

impl<T> JobHandle<T> {
    /// Blocks until the job has run.
    pub fn wait(self) -> Result<T, WorkerError> {
        self.receiver
            .recv()
            .unwrap_or(Err(WorkerError::Disconnected))
    }

    /// Returns the result if the job has finished, without blocking.
    ///
    /// Once a result has been taken, later calls report `Disconnected`.
    pub fn try_take(&self) -> Option<Result<T, WorkerError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(WorkerError::Disconnected)),
        }
    }
}

/// Dedicated thread that owns the journal connection.
pub struct JournalWorker {
    sender: Option<Sender<Job>>,
    thread: Option<JoinHandle<()>>,
}

impl JournalWorker {
    /// Moves `conn` onto a new worker thread.
    pub fn start(conn: Connection) -> Result<Self, WorkerError> {
        let (sender, receiver) = mpsc::channel::<Job>();
        let thread = std::thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || run_jobs(conn, receiver))
            .map_err(WorkerError::Spawn)?;

        info!("event=worker_start module=worker status=ok");
        Ok(Self {
            sender: Some(sender),
            thread: Some(thread),
        })
    }

    /// Queues `job` and returns a handle to its result.
    pub fn submit<T, F>(&self, job: F) -> Result<JobHandle<T>, WorkerError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> T + Send + 'static,
    {
        let sender = self.sender.as_ref().ok_or(WorkerError::Disconnected)?;
        let (result_tx, result_rx) = mpsc::channel();
        let boxed: Job = Box::new(move |conn: &Connection| {
            let outcome = catch_unwind(AssertUnwindSafe(|| job(conn)));
            let _ = result_tx.send(outcome.map_err(|_| WorkerError::JobPanicked));
        });
        sender
            .send(boxed)
            .map_err(|_| WorkerError::Disconnected)?;
        Ok(JobHandle {
            receiver: result_rx,
        })
    }

    /// Stops accepting jobs, drains the queue and joins the thread.
    pub fn shutdown(mut self) -> Result<(), WorkerError> {
        self.stop()
    }

    fn stop(&mut self) -> Result<(), WorkerError> {
        drop(self.sender.take());
        match self.thread.take() {
            Some(thread) => thread.join().map_err(|_| WorkerError::JobPanicked),
            None => Ok(()),
        }
    }
}

impl Drop for JournalWorker {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            error!("event=worker_stop module=worker status=error error={err}");
        }
    }
}

fn run_jobs(conn: Connection, receiver: Receiver<Job>) {
    let mut completed: u64 = 0;
    while let Ok(job) = receiver.recv() {
        job(&conn);
        completed += 1;
    }
    info!("event=worker_stop module=worker status=ok jobs={completed}");
}
