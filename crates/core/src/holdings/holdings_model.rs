//! Holdings domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One ticker's recorded position for one date.
///
/// Snapshots are immutable once stored; `(ticker, date)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSnapshot {
    pub date: NaiveDate,
    pub ticker: String,
    /// Share count, or a dollar amount for cash-equivalent lines.
    pub shares: Decimal,
    pub price: Decimal,
    pub value: Decimal,
    /// Portfolio weight as a fraction (0.05 == 5%).
    pub weight: Decimal,
}

/// All positions recorded for a single date.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DaySnapshot {
    pub date: NaiveDate,
    pub positions: Vec<PositionSnapshot>,
}

impl DaySnapshot {
    pub fn new(date: NaiveDate, positions: Vec<PositionSnapshot>) -> Self {
        Self { date, positions }
    }

    /// Picks the rows for `date` out of a multi-date scan result.
    pub fn from_scan(date: NaiveDate, scanned: &[PositionSnapshot]) -> Self {
        let positions = scanned
            .iter()
            .filter(|snapshot| snapshot.date == date)
            .cloned()
            .collect();
        Self { date, positions }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn get(&self, ticker: &str) -> Option<&PositionSnapshot> {
        self.positions.iter().find(|p| p.ticker == ticker)
    }
}

/// A raw row of the published holdings file, before normalisation.
///
/// Header names are matched after trimming; the file pads some of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HoldingRow {
    #[serde(rename = "Date", default)]
    pub date: String,
    #[serde(rename = "Stock Ticker", default)]
    pub stock_ticker: String,
    #[serde(rename = "Security Description", default)]
    pub security_description: String,
    #[serde(rename = "Shares/Par (Full)", default)]
    pub shares: String,
    #[serde(rename = "Price (Base)", default)]
    pub price: String,
    #[serde(rename = "Traded Market Value (Base)", default)]
    pub market_value: String,
    #[serde(rename = "Portfolio Weight %", default)]
    pub weight: String,
}

impl HoldingRow {
    /// True when every cell is empty (spreadsheet padding rows).
    pub fn is_blank(&self) -> bool {
        [
            &self.date,
            &self.stock_ticker,
            &self.security_description,
            &self.shares,
            &self.price,
            &self.market_value,
            &self.weight,
        ]
        .iter()
        .all(|cell| cell.trim().is_empty())
    }
}

/// A feed row that could not be normalised and was left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRow {
    /// 1-based line number in the source file.
    pub line: u64,
    pub message: String,
}

/// Result of parsing one holdings file.
#[derive(Debug, Clone)]
pub struct ParsedHoldings {
    pub as_of: NaiveDate,
    pub positions: Vec<PositionSnapshot>,
    pub skipped: Vec<SkippedRow>,
}

/// What an ingestion persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSummary {
    pub as_of: NaiveDate,
    pub stored: usize,
    pub skipped: Vec<SkippedRow>,
}
