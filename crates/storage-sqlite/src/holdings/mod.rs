//! SQLite storage implementation for holding snapshots.

mod model;
mod repository;

pub use model::{format_snapshot_date, HoldingSnapshotDB, SNAPSHOT_DATE_FORMAT};
pub use repository::HoldingSnapshotRepository;

// Re-export trait from core for convenience
pub use fundwatch_core::holdings::SnapshotRepositoryTrait;
