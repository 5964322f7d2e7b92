use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};

use log::{debug, warn};
use rust_decimal::Decimal;

use super::delta_model::{DeltaRecord, DeltaReport, PositionStatus};
use crate::errors::{DeltaError, Result, SnapshotError};
use crate::holdings::{DaySnapshot, PositionSnapshot};

/// Compares the `current` session's holdings against the `previous` one.
///
/// Cash-equivalent tickers are left out of the records and summed into
/// [`DeltaReport::cash_total`]. The result is fully ordered, so two runs over
/// the same snapshots produce identical output.
pub fn compute_deltas(
    current: &DaySnapshot,
    previous: &DaySnapshot,
    cash_tickers: &HashSet<String>,
) -> Result<DeltaReport> {
    if current.date <= previous.date {
        return Err(DeltaError::InvertedSnapshots {
            current: current.date,
            previous: previous.date,
        }
        .into());
    }
    if current.is_empty() && previous.is_empty() {
        return Err(SnapshotError::MissingSnapshot {
            current: current.date,
            previous: previous.date,
        }
        .into());
    }

    let current_by_ticker = index_by_ticker(current);
    let previous_by_ticker = index_by_ticker(previous);

    let tickers: BTreeSet<&str> = current_by_ticker
        .keys()
        .chain(previous_by_ticker.keys())
        .copied()
        .collect();

    let mut records = Vec::with_capacity(tickers.len());
    let mut cash_total: Option<Decimal> = None;

    for ticker in tickers {
        let today = current_by_ticker.get(ticker).copied();
        let before = previous_by_ticker.get(ticker).copied();

        if cash_tickers.contains(ticker) {
            if let Some(position) = today {
                // Cash lines carry a dollar amount in the shares column
                *cash_total.get_or_insert(Decimal::ZERO) += position.shares;
            }
            continue;
        }

        if let Some(record) = delta_for(ticker, today, before) {
            records.push(record);
        }
    }

    records.sort_by(presentation_order);

    let stale_feed = looks_stale(current, previous, &records);
    if stale_feed {
        warn!(
            "Holdings for {} look unpublished (compared with {})",
            current.date, previous.date
        );
    }
    debug!(
        "Computed {} deltas between {} and {}",
        records.len(),
        previous.date,
        current.date
    );

    Ok(DeltaReport {
        current_date: current.date,
        previous_date: previous.date,
        records,
        cash_total,
        stale_feed,
    })
}

fn index_by_ticker(day: &DaySnapshot) -> HashMap<&str, &PositionSnapshot> {
    day.positions
        .iter()
        .map(|position| (position.ticker.as_str(), position))
        .collect()
}

fn delta_for(
    ticker: &str,
    today: Option<&PositionSnapshot>,
    before: Option<&PositionSnapshot>,
) -> Option<DeltaRecord> {
    match (today, before) {
        (Some(today), Some(before)) => Some(DeltaRecord {
            ticker: ticker.to_string(),
            share_delta: today.shares - before.shares,
            pct_change: pct_change(today.shares, before.shares),
            weight: today.weight,
            shares: today.shares,
            previous_shares: Some(before.shares),
            status: PositionStatus::Held,
        }),
        (Some(today), None) => Some(DeltaRecord {
            ticker: ticker.to_string(),
            share_delta: today.shares,
            pct_change: Decimal::ZERO,
            weight: today.weight,
            shares: today.shares,
            previous_shares: None,
            status: PositionStatus::New,
        }),
        // Exits report the full position as sold: -100%
        (None, Some(before)) => Some(DeltaRecord {
            ticker: ticker.to_string(),
            share_delta: -before.shares,
            pct_change: if before.shares.is_zero() {
                Decimal::ZERO
            } else {
                Decimal::NEGATIVE_ONE
            },
            weight: before.weight,
            shares: Decimal::ZERO,
            previous_shares: Some(before.shares),
            status: PositionStatus::Exited,
        }),
        (None, None) => None,
    }
}

/// current / previous - 1, unrounded; zero when there is nothing to divide by.
fn pct_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        return Decimal::ZERO;
    }
    current
        .checked_div(previous)
        .map(|ratio| ratio - Decimal::ONE)
        .unwrap_or(Decimal::ZERO)
}

fn presentation_order(a: &DeltaRecord, b: &DeltaRecord) -> Ordering {
    b.share_delta
        .cmp(&a.share_delta)
        .then_with(|| b.weight.cmp(&a.weight))
        .then_with(|| a.ticker.cmp(&b.ticker))
}

/// Every weighted position "moved" without a prior position to compare
/// against: the previous session is really missing, not the fund trading.
fn looks_stale(current: &DaySnapshot, previous: &DaySnapshot, records: &[DeltaRecord]) -> bool {
    if current.is_empty() && !previous.is_empty() {
        return true;
    }
    let mut weighted = records.iter().filter(|r| !r.weight.is_zero()).peekable();
    weighted.peek().is_some() && weighted.all(DeltaRecord::is_new_position)
}
