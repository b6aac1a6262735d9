//! Concurrent, order-preserving batch resolution.
//!
//! A batch of input rows is resolved by a fixed pool of workers:
//!
//! 1. every row becomes a [`Job`] in a closed [`JobQueue`]
//! 2. workers claim jobs and resolve them independently, sending one
//!    [`ItemResult`] per job over a channel
//! 3. the collector writes each result into the slot named by its index
//!
//! Output order is restored by the collector alone; workers may finish in
//! any order. A failing item becomes an error [`Outcome`] in its own slot
//! and never affects other items.

mod collector;
mod config;
mod job;
mod outcome;
mod worker;

#[cfg(test)]
mod pipeline_tests;

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::resolver::Resolver;

pub use collector::collect_results;
pub use config::{DEFAULT_WORKERS, PipelineConfig};
pub use job::{Job, JobQueue};
pub use outcome::{BatchSummary, ERROR_SENTINEL, ItemResult, Outcome};
pub use worker::{resolve_job, resolve_query, spawn_workers};

/// A worker pool bound to a resolver.
pub struct Pipeline<R> {
    resolver: Arc<R>,
    config: PipelineConfig,
}

impl<R: Resolver + 'static> Pipeline<R> {
    /// Create a pipeline owning the given resolver.
    pub fn new(resolver: R, config: PipelineConfig) -> Self {
        Self::with_shared(Arc::new(resolver), config)
    }

    /// Create a pipeline sharing an existing resolver.
    pub fn with_shared(resolver: Arc<R>, config: PipelineConfig) -> Self {
        Self { resolver, config }
    }

    /// Resolve a batch of records (header row already removed).
    ///
    /// Returns exactly one result per record, ordered by record position.
    /// Must be called within a tokio runtime.
    pub async fn run(&self, records: Vec<Vec<String>>) -> Vec<ItemResult> {
        let total = records.len();
        let queue = JobQueue::submit(records);
        // Sized to the batch so no worker waits to hand off a result.
        let (result_tx, result_rx) = mpsc::channel(total.max(1));

        debug!(total, workers = self.config.workers, "Starting batch");

        let handles = spawn_workers(
            Arc::clone(&self.resolver),
            queue,
            result_tx,
            self.config.workers,
        );

        // The channel closes once the last worker drops its sender, which
        // ends collection.
        let (joined, results) =
            tokio::join!(join_all(handles), collect_results(result_rx, total));

        let mut completed = 0;
        for (worker_id, outcome) in joined.into_iter().enumerate() {
            match outcome {
                Ok(count) => completed += count,
                Err(e) => warn!(worker_id, error = %e, "Worker task failed"),
            }
        }

        debug!(total, completed, "Batch complete");
        results
    }
}
