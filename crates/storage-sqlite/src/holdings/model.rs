//! Database model for per-ticker holding snapshots.

use std::str::FromStr;

use chrono::{NaiveDate, SecondsFormat, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::errors::StorageError;
use fundwatch_core::holdings::PositionSnapshot;

/// Storage format of `snapshot_date`.
pub const SNAPSHOT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Decimals are stored as text so values round-trip exactly.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::holding_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HoldingSnapshotDB {
    pub ticker: String,
    pub snapshot_date: String,
    pub shares: String,
    pub price: String,
    pub market_value: String,
    pub weight: String,
    pub ingested_at: String,
}

pub fn format_snapshot_date(date: NaiveDate) -> String {
    date.format(SNAPSHOT_DATE_FORMAT).to_string()
}

// Conversion from Domain model to DB model
impl From<&PositionSnapshot> for HoldingSnapshotDB {
    fn from(snapshot: &PositionSnapshot) -> Self {
        Self {
            ticker: snapshot.ticker.clone(),
            snapshot_date: format_snapshot_date(snapshot.date),
            shares: snapshot.shares.to_string(),
            price: snapshot.price.to_string(),
            market_value: snapshot.value.to_string(),
            weight: snapshot.weight.to_string(),
            ingested_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

// Conversion from DB model to Domain model
impl TryFrom<HoldingSnapshotDB> for PositionSnapshot {
    type Error = StorageError;

    fn try_from(db: HoldingSnapshotDB) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(&db.snapshot_date, SNAPSHOT_DATE_FORMAT)
            .map_err(|e| decode_error(&db.ticker, "snapshot_date", &db.snapshot_date, e))?;
        let decimal = |column: &str, raw: &str| {
            Decimal::from_str(raw).map_err(|e| decode_error(&db.ticker, column, raw, e))
        };

        Ok(PositionSnapshot {
            date,
            shares: decimal("shares", &db.shares)?,
            price: decimal("price", &db.price)?,
            value: decimal("market_value", &db.market_value)?,
            weight: decimal("weight", &db.weight)?,
            ticker: db.ticker,
        })
    }
}

fn decode_error(ticker: &str, column: &str, raw: &str, e: impl std::fmt::Display) -> StorageError {
    StorageError::Decode(format!("{} for '{}': '{}' ({})", column, ticker, raw, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn snapshot() -> PositionSnapshot {
        PositionSnapshot {
            date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
            ticker: "GTBIF".to_string(),
            shares: dec!(1234567),
            price: dec!(12.50),
            value: dec!(15432087.50),
            weight: dec!(0.1025),
        }
    }

    #[test]
    fn test_db_row_keeps_decimal_text() {
        let row = HoldingSnapshotDB::from(&snapshot());
        assert_eq!(row.snapshot_date, "2024-03-08");
        assert_eq!(row.price, "12.50");
        assert_eq!(row.weight, "0.1025");
        assert_eq!(PositionSnapshot::try_from(row).unwrap(), snapshot());
    }

    #[test]
    fn test_corrupt_row_is_a_decode_error() {
        let mut row = HoldingSnapshotDB::from(&snapshot());
        row.shares = "lots".to_string();
        let err = PositionSnapshot::try_from(row).unwrap_err();
        assert!(matches!(err, StorageError::Decode(ref m) if m.contains("shares")));
    }
}
