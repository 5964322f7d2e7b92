//! Collaborator traits for the holdings feed and snapshot store.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::PositionSnapshot;
use crate::errors::Result;

/// Persistent store of position snapshots, keyed by `(ticker, date)`.
///
/// Writes with an existing key replace the stored row; history is never
/// deleted.
#[async_trait]
pub trait SnapshotRepositoryTrait: Send + Sync {
    /// Persist a single snapshot.
    async fn put(&self, snapshot: &PositionSnapshot) -> Result<()>;

    /// Persist a batch of snapshots in one transaction.
    /// Returns the number of rows written.
    async fn put_all(&self, snapshots: &[PositionSnapshot]) -> Result<usize>;

    /// Load every snapshot whose date is in `dates`.
    fn scan_by_dates(&self, dates: &[NaiveDate]) -> Result<Vec<PositionSnapshot>>;

    /// Up to `limit` dates that have stored snapshots, newest first.
    fn latest_dates(&self, limit: usize) -> Result<Vec<NaiveDate>>;
}

/// Source of the published holdings file.
#[async_trait]
pub trait HoldingsFeedTrait: Send + Sync {
    /// Link shown in reports so readers can check the raw file.
    fn source_url(&self) -> &str;

    /// Download the raw CSV bytes.
    async fn fetch_csv(&self) -> Result<Vec<u8>>;
}
