//! Delta domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a ticker moved between the two sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionStatus {
    /// Present in both sessions
    Held,
    /// Present only in the current session
    New,
    /// Present only in the previous session
    Exited,
}

/// Change in one ticker's position. Derived on every run, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeltaRecord {
    pub ticker: String,
    /// current - previous shares
    pub share_delta: Decimal,
    /// current / previous - 1, as an unrounded fraction. Zero without a
    /// comparable previous position.
    pub pct_change: Decimal,
    pub weight: Decimal,
    /// Current share count (zero for exited positions).
    pub shares: Decimal,
    pub previous_shares: Option<Decimal>,
    pub status: PositionStatus,
}

impl DeltaRecord {
    /// Shares moved with no comparable previous position to measure against:
    /// the ticker is new, or it was held at zero shares.
    pub fn is_new_position(&self) -> bool {
        match self.status {
            PositionStatus::New => true,
            PositionStatus::Held => {
                self.previous_shares.is_some_and(|shares| shares.is_zero())
                    && !self.share_delta.is_zero()
            }
            PositionStatus::Exited => false,
        }
    }
}

/// Output of one delta computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeltaReport {
    pub current_date: NaiveDate,
    pub previous_date: NaiveDate,
    /// Ordered by share delta desc, then weight desc, then ticker.
    pub records: Vec<DeltaRecord>,
    /// Sum of current cash-equivalent lines, `None` when none were held.
    pub cash_total: Option<Decimal>,
    /// The new session looks unpublished; callers should not present the
    /// records as real changes.
    pub stale_feed: bool,
}
