//! Fundwatch Core - Domain entities, services, and traits.
//!
//! This crate contains the holdings-delta logic: feed normalisation,
//! trading-calendar resolution, snapshot comparison and report rendering.
//! It is storage- and transport-agnostic and defines traits that are
//! implemented by the `storage-sqlite` and `transport` crates.

pub mod calendar;
pub mod constants;
pub mod delta;
pub mod errors;
pub mod holdings;
pub mod report;
pub mod utils;
pub mod watcher;

// Re-export the types most callers need
pub use holdings::{DaySnapshot, PositionSnapshot};
pub use watcher::{HoldingsWatcher, RunOutcome, WatcherSettings};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
