//! Remote lookups used to resolve a station.
//!
//! Resolution chains two services:
//! - a station search (HeartRails Express) mapping a station name to the
//!   stations of that name, each with a postal code
//! - a postal code search mapping a code to a Japanese address
//!
//! The pipeline only sees the [`Resolver`] trait, so it can be driven by
//! [`HttpResolver`] in production and [`MockResolver`] in tests.

mod client;
mod error;
mod mock;
mod types;

use crate::domain::Candidate;

pub use client::{HttpResolver, ResolverConfig};
pub use error::ResolveError;
pub use mock::MockResolver;
pub use types::{
    AddressDetail, AddressDto, AddressResponse, StationDto, StationsEnvelope, StationsResponse,
};

/// The two lookups a station resolution needs.
///
/// Implementations are shared by every worker, so calls take `&self` and
/// must be safe to issue concurrently.
pub trait Resolver: Send + Sync {
    /// Find the stations with the given name.
    ///
    /// An empty list is a valid answer: the service knows no such station.
    fn lookup_station(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<Candidate>, ResolveError>> + Send;

    /// Find the formatted address for a postal code.
    ///
    /// Returns an empty string when the service has no address for the code.
    fn lookup_address(
        &self,
        postal: &str,
    ) -> impl Future<Output = Result<String, ResolveError>> + Send;
}
