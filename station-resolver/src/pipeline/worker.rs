//! Workers: resolve one job at a time until the queue is drained.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::domain::{StationQuery, select_candidate};
use crate::resolver::Resolver;

use super::job::{Job, JobQueue};
use super::outcome::{ItemResult, Outcome};

/// Resolve a parsed query to an address.
///
/// Looks up the station, picks a candidate using the query's hint and looks
/// up that candidate's postal code. Never fails: lookup errors and an
/// unsatisfied query become the corresponding [`Outcome`].
pub async fn resolve_query<R: Resolver>(resolver: &R, query: &StationQuery) -> Outcome {
    let candidates = match resolver.lookup_station(&query.name).await {
        Ok(candidates) => candidates,
        Err(e) => return Outcome::Failed(e),
    };

    let Some(candidate) = select_candidate(&candidates, query.hint()) else {
        return Outcome::NoMatch {
            candidates: candidates.len(),
        };
    };

    match resolver.lookup_address(&candidate.postal).await {
        Ok(address) => Outcome::Address(address),
        Err(e) => Outcome::Failed(e),
    }
}

/// Parse a job's station field and resolve it.
pub async fn resolve_job<R: Resolver>(resolver: &R, job: &Job) -> ItemResult {
    let query = StationQuery::parse(job.station_field());
    let outcome = resolve_query(resolver, &query).await;
    log_outcome(job.index, &query, &outcome);
    ItemResult::new(job.index, outcome)
}

/// Report an item's outcome. This is the only place item failures are logged.
fn log_outcome(index: usize, query: &StationQuery, outcome: &Outcome) {
    match outcome {
        Outcome::Address(address) if address.is_empty() => {
            debug!(index, station = %query, "Resolved with no address text");
        }
        Outcome::Address(address) => {
            trace!(index, station = %query, %address, "Resolved");
        }
        Outcome::NoMatch { candidates } => {
            warn!(index, station = %query, candidates, "No matching station");
        }
        Outcome::Failed(e) => {
            warn!(index, station = %query, error = %e, "Lookup failed");
        }
    }
}

/// Spawn `count` workers draining `queue`.
///
/// Each worker claims a job, resolves it and sends exactly one result,
/// until the queue is drained. Each handle yields the number of jobs that
/// worker completed. The result channel closes when every worker has
/// exited and the caller has dropped its own sender.
pub fn spawn_workers<R>(
    resolver: Arc<R>,
    queue: JobQueue,
    results: mpsc::Sender<ItemResult>,
    count: usize,
) -> Vec<JoinHandle<usize>>
where
    R: Resolver + 'static,
{
    (0..count)
        .map(|worker_id| {
            let resolver = Arc::clone(&resolver);
            let queue = queue.clone();
            let results = results.clone();

            tokio::spawn(async move {
                let mut completed = 0;

                while let Some(job) = queue.claim().await {
                    let result = resolve_job(resolver.as_ref(), &job).await;
                    if results.send(result).await.is_err() {
                        warn!(worker_id, index = job.index, "Result channel closed, stopping");
                        break;
                    }
                    completed += 1;
                }

                trace!(worker_id, completed, "Worker finished");
                completed
            })
        })
        .collect()
}
