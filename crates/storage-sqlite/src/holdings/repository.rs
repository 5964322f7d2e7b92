use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use log::debug;

use super::model::{format_snapshot_date, HoldingSnapshotDB, SNAPSHOT_DATE_FORMAT};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use fundwatch_core::errors::{Error, Result};
use fundwatch_core::holdings::{PositionSnapshot, SnapshotRepositoryTrait};

/// SQLite-backed store of daily position snapshots.
pub struct HoldingSnapshotRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl HoldingSnapshotRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    /// Writes `snapshots` in one transaction, replacing rows with the same
    /// `(ticker, snapshot_date)`.
    pub async fn save_snapshots(&self, snapshots: &[PositionSnapshot]) -> Result<usize> {
        use crate::schema::holding_snapshots::dsl::*;

        if snapshots.is_empty() {
            debug!("save_snapshots called with no snapshots. Nothing to save.");
            return Ok(0);
        }

        let db_models: Vec<HoldingSnapshotDB> =
            snapshots.iter().map(HoldingSnapshotDB::from).collect();
        let count = db_models.len();
        debug!("Saving {} holding snapshots", count);

        self.writer
            .exec(move |conn| {
                diesel::replace_into(holding_snapshots)
                    .values(&db_models)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(count)
            })
            .await
    }

    pub fn get_snapshots_by_dates(&self, dates: &[NaiveDate]) -> Result<Vec<PositionSnapshot>> {
        use crate::schema::holding_snapshots::dsl::*;

        if dates.is_empty() {
            return Ok(Vec::new());
        }
        let date_keys: Vec<String> = dates.iter().copied().map(format_snapshot_date).collect();

        let mut conn = get_connection(&self.pool)?;
        let rows = holding_snapshots
            .filter(snapshot_date.eq_any(&date_keys))
            .order((snapshot_date.asc(), ticker.asc()))
            .select(HoldingSnapshotDB::as_select())
            .load::<HoldingSnapshotDB>(&mut conn)
            .into_core()?;

        debug!("Loaded {} holding snapshots for {:?}", rows.len(), date_keys);
        rows.into_iter()
            .map(|row| PositionSnapshot::try_from(row).map_err(Error::from))
            .collect()
    }

    /// Most recent dates with stored holdings, newest first.
    pub fn get_latest_dates(&self, limit: i64) -> Result<Vec<NaiveDate>> {
        use crate::schema::holding_snapshots::dsl::*;

        let mut conn = get_connection(&self.pool)?;
        let keys: Vec<String> = holding_snapshots
            .select(snapshot_date)
            .distinct()
            .order(snapshot_date.desc())
            .limit(limit)
            .load::<String>(&mut conn)
            .into_core()?;

        keys.iter()
            .map(|key| {
                NaiveDate::parse_from_str(key, SNAPSHOT_DATE_FORMAT).map_err(|e| {
                    Error::from(StorageError::Decode(format!(
                        "snapshot_date '{}' ({})",
                        key, e
                    )))
                })
            })
            .collect()
    }
}

#[async_trait]
impl SnapshotRepositoryTrait for HoldingSnapshotRepository {
    async fn put(&self, snapshot: &PositionSnapshot) -> Result<()> {
        self.save_snapshots(std::slice::from_ref(snapshot)).await?;
        Ok(())
    }

    async fn put_all(&self, snapshots: &[PositionSnapshot]) -> Result<usize> {
        self.save_snapshots(snapshots).await
    }

    fn scan_by_dates(&self, dates: &[NaiveDate]) -> Result<Vec<PositionSnapshot>> {
        self.get_snapshots_by_dates(dates)
    }

    fn latest_dates(&self, limit: usize) -> Result<Vec<NaiveDate>> {
        self.get_latest_dates(i64::try_from(limit).unwrap_or(i64::MAX))
    }
}
