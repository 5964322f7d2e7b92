//! Watcher module - orchestrates one daily run.

mod watcher_model;
mod watcher_service;

pub use watcher_model::{RunOutcome, WatcherSettings};
pub use watcher_service::HoldingsWatcher;

#[cfg(test)]
mod watcher_service_tests;
