//! Holdings module - feed rows, normalisation, ingestion and storage traits.

mod csv_ingest;
mod holdings_model;
mod holdings_traits;
pub mod normalizer;

pub use csv_ingest::{normalize_row, parse_holdings_csv};
pub use holdings_model::{
    DaySnapshot, HoldingRow, IngestSummary, ParsedHoldings, PositionSnapshot, SkippedRow,
};
pub use holdings_traits::{HoldingsFeedTrait, SnapshotRepositoryTrait};
pub use normalizer::{parse_amount, parse_feed_date, parse_percent, parse_shares, resolve_ticker};
