//! In-memory resolver for testing without network access.
//!
//! Serves canned candidates and addresses, with optional per-station
//! delays to shuffle completion order and injectable failures.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::domain::Candidate;

use super::Resolver;
use super::error::ResolveError;

/// Deterministic resolver backed by lookup tables.
///
/// Unknown station names resolve to an empty candidate list, mirroring the
/// station service. Unknown postal codes fail with a 404, mirroring the
/// postal code service.
#[derive(Debug, Clone, Default)]
pub struct MockResolver {
    stations: HashMap<String, Vec<Candidate>>,
    addresses: HashMap<String, String>,
    failing_stations: HashSet<String>,
    failing_postals: HashSet<String>,
    delays: HashMap<String, Duration>,
    calls: Arc<AtomicUsize>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the candidates returned for a station name.
    pub fn with_station(mut self, name: impl Into<String>, candidates: Vec<Candidate>) -> Self {
        self.stations.insert(name.into(), candidates);
        self
    }

    /// Register the formatted address returned for a postal code.
    pub fn with_address(mut self, postal: impl Into<String>, address: impl Into<String>) -> Self {
        self.addresses.insert(postal.into(), address.into());
        self
    }

    /// Make station lookups for `name` fail with a server error.
    pub fn with_station_failure(mut self, name: impl Into<String>) -> Self {
        self.failing_stations.insert(name.into());
        self
    }

    /// Make address lookups for `postal` fail with a server error.
    pub fn with_address_failure(mut self, postal: impl Into<String>) -> Self {
        self.failing_postals.insert(postal.into());
        self
    }

    /// Delay station lookups for `name`.
    pub fn with_delay(mut self, name: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(name.into(), delay);
        self
    }

    /// Total number of lookups served, across clones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Resolver for MockResolver {
    async fn lookup_station(&self, name: &str) -> Result<Vec<Candidate>, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(name) {
            tokio::time::sleep(*delay).await;
        }

        if self.failing_stations.contains(name) {
            return Err(ResolveError::Api {
                status: 503,
                message: format!("station lookup unavailable for {name}"),
            });
        }

        Ok(self.stations.get(name).cloned().unwrap_or_default())
    }

    async fn lookup_address(&self, postal: &str) -> Result<String, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing_postals.contains(postal) {
            return Err(ResolveError::Api {
                status: 503,
                message: format!("address lookup unavailable for {postal}"),
            });
        }

        self.addresses
            .get(postal)
            .cloned()
            .ok_or_else(|| ResolveError::Api {
                status: 404,
                message: format!("no such postal code: {postal}"),
            })
    }
}
