//! Per-item outcomes and their rendering.

use crate::resolver::ResolveError;

/// Output cell written for any item that did not resolve.
pub const ERROR_SENTINEL: &str = "ERROR";

/// How a single item was resolved.
#[derive(Debug)]
pub enum Outcome {
    /// The address lookup succeeded. The text may be empty when the
    /// postal code service had no address for the code.
    Address(String),

    /// The station lookup succeeded but no candidate satisfied the query.
    NoMatch {
        /// Number of candidates the lookup returned.
        candidates: usize,
    },

    /// A lookup failed.
    Failed(ResolveError),
}

impl Outcome {
    /// Returns true for outcomes rendered as the error sentinel.
    pub fn is_error(&self) -> bool {
        !matches!(self, Outcome::Address(_))
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, Outcome::NoMatch { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    /// The output cell for this outcome.
    ///
    /// No-match and failure both render as [`ERROR_SENTINEL`]; an empty
    /// address renders as an empty cell.
    pub fn render(&self) -> &str {
        match self {
            Outcome::Address(address) => address,
            Outcome::NoMatch { .. } | Outcome::Failed(_) => ERROR_SENTINEL,
        }
    }
}

/// The outcome for the job at `index`.
#[derive(Debug)]
pub struct ItemResult {
    pub index: usize,
    pub outcome: Outcome,
}

impl ItemResult {
    pub fn new(index: usize, outcome: Outcome) -> Self {
        Self { index, outcome }
    }

    pub fn is_error(&self) -> bool {
        self.outcome.is_error()
    }

    pub fn render(&self) -> &str {
        self.outcome.render()
    }
}

/// Counts of outcomes in a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub resolved: usize,
    /// Resolved, but with no address text.
    pub empty: usize,
    pub no_match: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[ItemResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };

        for result in results {
            match &result.outcome {
                Outcome::Address(address) if address.is_empty() => summary.empty += 1,
                Outcome::Address(_) => summary.resolved += 1,
                Outcome::NoMatch { .. } => summary.no_match += 1,
                Outcome::Failed(_) => summary.failed += 1,
            }
        }

        summary
    }

    /// Number of items rendered as the error sentinel.
    pub fn errors(&self) -> usize {
        self.no_match + self.failed
    }
}
