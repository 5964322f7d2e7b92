//! Delta module - comparison of two daily holdings snapshots.

mod delta_engine;
mod delta_model;

pub use delta_engine::compute_deltas;
pub use delta_model::{DeltaRecord, DeltaReport, PositionStatus};
