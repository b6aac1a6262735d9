//! Core domain types.
//!
//! These types model a station query parsed from an input row and the
//! station candidates a lookup can return for it. They carry no I/O.

mod query;
mod station;

pub use query::StationQuery;
pub use station::{Candidate, select_candidate};
