//! Parsing of the published holdings CSV.

use std::collections::HashMap;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};

use crate::errors::{Error, Result, ValidationError};

use super::holdings_model::{HoldingRow, ParsedHoldings, PositionSnapshot, SkippedRow};
use super::normalizer::{parse_amount, parse_feed_date, parse_percent, parse_shares, resolve_ticker};

/// Parses a holdings file into per-ticker snapshots for a single as-of date.
///
/// The as-of date is read from the first row carrying a valid date and is
/// stamped on every snapshot. Rows with malformed cells are skipped and
/// reported in [`ParsedHoldings::skipped`]; they never abort the parse.
pub fn parse_holdings_csv(content: &[u8]) -> Result<ParsedHoldings> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(content);

    let headers = reader
        .headers()
        .map_err(|e| Error::Ingestion(format!("Unreadable header row: {}", e)))?
        .clone();

    let mut skipped = Vec::new();
    let mut rows: Vec<(u64, HoldingRow)> = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let fallback_line = index as u64 + 2;
        match record {
            Ok(record) => {
                let line = record_line(&record).unwrap_or(fallback_line);
                match record.deserialize::<HoldingRow>(Some(&headers)) {
                    Ok(row) if row.is_blank() => continue,
                    Ok(row) => rows.push((line, row)),
                    Err(e) => skip(&mut skipped, line, e.to_string()),
                }
            }
            Err(e) => skip(&mut skipped, fallback_line, e.to_string()),
        }
    }

    let as_of = rows
        .iter()
        .find_map(|(_, row)| parse_feed_date(&row.date).ok())
        .ok_or_else(|| Error::Ingestion("Holdings file contains no dated rows".to_string()))?;
    debug!("Holdings file as-of date: {}", as_of);

    let mut positions: Vec<PositionSnapshot> = Vec::with_capacity(rows.len());
    let mut index_by_ticker: HashMap<String, usize> = HashMap::new();

    for (line, row) in &rows {
        match normalize_row(row, as_of) {
            Ok(snapshot) => {
                if let Some(&existing) = index_by_ticker.get(&snapshot.ticker) {
                    warn!(
                        "Duplicate ticker '{}' on line {}; keeping the later row",
                        snapshot.ticker, line
                    );
                    positions[existing] = snapshot;
                } else {
                    index_by_ticker.insert(snapshot.ticker.clone(), positions.len());
                    positions.push(snapshot);
                }
            }
            Err(e) => skip(&mut skipped, *line, e.to_string()),
        }
    }

    if positions.is_empty() {
        return Err(Error::Ingestion(format!(
            "No valid holdings rows for {} ({} rows skipped)",
            as_of,
            skipped.len()
        )));
    }

    Ok(ParsedHoldings {
        as_of,
        positions,
        skipped,
    })
}

/// Normalises a single raw row, stamping it with the file's as-of date.
pub fn normalize_row(
    row: &HoldingRow,
    as_of: NaiveDate,
) -> std::result::Result<PositionSnapshot, ValidationError> {
    if !row.date.trim().is_empty() {
        let row_date = parse_feed_date(&row.date)?;
        if row_date != as_of {
            warn!(
                "Row dated {} in a file dated {}; storing under {}",
                row_date, as_of, as_of
            );
        }
    }

    Ok(PositionSnapshot {
        date: as_of,
        ticker: resolve_ticker(row)?,
        shares: parse_shares(&row.shares)?,
        price: parse_amount("price", &row.price)?,
        value: parse_amount("value", &row.market_value)?,
        weight: parse_percent(&row.weight)?,
    })
}

fn record_line(record: &StringRecord) -> Option<u64> {
    record.position().map(|position| position.line())
}

fn skip(skipped: &mut Vec<SkippedRow>, line: u64, message: String) {
    warn!("Skipping holdings row on line {}: {}", line, message);
    skipped.push(SkippedRow { line, message });
}
