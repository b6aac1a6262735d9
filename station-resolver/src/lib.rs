//! Station to address resolver.
//!
//! Resolves a batch of Japanese station names, optionally qualified with a
//! line or prefecture in parentheses, into prefecture addresses. Each name
//! is looked up in a station search for its postal code, and the postal
//! code in a postal code search for its address. Items are resolved by a
//! fixed worker pool; output order always follows input order.

pub mod cli;
pub mod domain;
pub mod pipeline;
pub mod resolver;
pub mod table;
