//! Order-restoring collection of worker results.

use tokio::sync::mpsc;
use tracing::warn;

use crate::resolver::ResolveError;

use super::outcome::{ItemResult, Outcome};

/// Gather results into input order.
///
/// Results arrive in completion order; each is stored in the slot named by
/// its index. Returns once the channel is closed and drained, with exactly
/// `total` results ordered by index.
///
/// A slot that never received a result (its worker died mid-job) is filled
/// with a failure. Duplicate and out-of-range indices are dropped.
pub async fn collect_results(
    mut rx: mpsc::Receiver<ItemResult>,
    total: usize,
) -> Vec<ItemResult> {
    let mut slots: Vec<Option<Outcome>> = std::iter::repeat_with(|| None).take(total).collect();

    while let Some(result) = rx.recv().await {
        let Some(slot) = slots.get_mut(result.index) else {
            warn!(index = result.index, total, "Result index out of range, dropping");
            continue;
        };
        if slot.is_some() {
            warn!(index = result.index, "Duplicate result, dropping");
            continue;
        }
        *slot = Some(result.outcome);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            let outcome = slot.unwrap_or_else(|| {
                warn!(index, "No result received");
                Outcome::Failed(ResolveError::Aborted(
                    "worker exited without a result".to_string(),
                ))
            });
            ItemResult::new(index, outcome)
        })
        .collect()
}
