//! Jobs and the shared job queue.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};

/// One input row waiting to be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Position of the row in the batch (header excluded).
    pub index: usize,
    /// Raw fields of the row.
    pub record: Vec<String>,
}

impl Job {
    pub fn new(index: usize, record: Vec<String>) -> Self {
        Self { index, record }
    }

    /// The raw station field: the first field of the row, or `""` for an
    /// empty row.
    pub fn station_field(&self) -> &str {
        self.record.first().map(String::as_str).unwrap_or("")
    }
}

/// A closed queue holding every job of a batch.
///
/// All jobs are enqueued up front and the sending side is dropped, so once
/// the queue is empty [`JobQueue::claim`] returns `None` and workers exit.
/// Clones share the same queue.
#[derive(Debug, Clone)]
pub struct JobQueue {
    rx: Arc<Mutex<mpsc::UnboundedReceiver<Job>>>,
    len: usize,
}

impl JobQueue {
    /// Enqueue one job per record, indexed by position, and close the queue.
    pub fn submit(records: Vec<Vec<String>>) -> Self {
        let len = records.len();
        // Holds the whole batch, so enqueueing never waits.
        let (tx, rx) = mpsc::unbounded_channel();

        for (index, record) in records.into_iter().enumerate() {
            // `rx` is alive until it moves into the queue, so send cannot fail.
            let _ = tx.send(Job::new(index, record));
        }

        Self {
            rx: Arc::new(Mutex::new(rx)),
            len,
        }
    }

    /// Take the next job, or `None` once the queue is drained.
    pub async fn claim(&self) -> Option<Job> {
        self.rx.lock().await.recv().await
    }

    /// Number of jobs submitted.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the batch had no jobs.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
