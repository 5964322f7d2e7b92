//! Normalisation of raw holdings-file cells into canonical values.
//!
//! The published file writes numbers the way a spreadsheet displays them:
//! `1,234`, `(1,234)` for negatives, `$12.50`, `4.73%`. Everything here
//! returns a [`ValidationError::MalformedField`] on bad input so ingestion can
//! skip the row and keep going.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{NOT_A_NUMBER_MARKER, PERCENT_PRECISION};
use crate::errors::ValidationError;

use super::holdings_model::HoldingRow;

type FieldResult<T> = std::result::Result<T, ValidationError>;

/// Date formats the feed has been seen to use, tried in order.
const FEED_DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];

/// Parses a share count such as `1,234`, `(1,234)` or `-12.5`.
pub fn parse_shares(raw: &str) -> FieldResult<Decimal> {
    parse_signed_number("shares", raw, false)
}

/// Parses a price or market value; a `$` prefix is tolerated.
pub fn parse_amount(field: &str, raw: &str) -> FieldResult<Decimal> {
    parse_signed_number(field, raw, true)
}

/// Parses a percentage cell (`4.73%` or `4.73`) into a fraction (`0.0473`).
///
/// The result is rounded to [`PERCENT_PRECISION`] places so repeated runs
/// over the same file always store the same value.
pub fn parse_percent(raw: &str) -> FieldResult<Decimal> {
    let trimmed = raw.trim();
    let without_sign = match trimmed.strip_suffix('%') {
        Some(number) => number.to_string(),
        // (0.50%)
        None => match trimmed.strip_suffix("%)") {
            Some(number) => format!("{})", number),
            None => trimmed.to_string(),
        },
    };
    let value = parse_signed_number("weight", &without_sign, false).map_err(|_| {
        ValidationError::malformed("weight", raw, "not a percentage")
    })?;
    Ok((value / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(PERCENT_PRECISION, RoundingStrategy::MidpointAwayFromZero)
        .normalize())
}

/// Picks the identifier for a row.
///
/// The stock ticker column wins; rows without one (cash, swaps, treasury
/// funds) fall back to the security description.
pub fn resolve_ticker(row: &HoldingRow) -> FieldResult<String> {
    if let Some(ticker) = usable_identifier(&row.stock_ticker) {
        return Ok(ticker.to_string());
    }
    usable_identifier(&row.security_description)
        .map(str::to_string)
        .ok_or_else(|| {
            ValidationError::malformed(
                "ticker",
                row.stock_ticker.trim(),
                "both stock ticker and security description are blank",
            )
        })
}

/// Parses the feed's date column.
pub fn parse_feed_date(raw: &str) -> FieldResult<NaiveDate> {
    let trimmed = raw.trim();
    FEED_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| ValidationError::malformed("date", raw, "unrecognised date format"))
}

fn usable_identifier(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NOT_A_NUMBER_MARKER) {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_signed_number(field: &str, raw: &str, allow_currency: bool) -> FieldResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::malformed(field, raw, "empty value"));
    }

    // Accounting notation: (1,234) is -1234
    let (parenthesized, body) = match trimmed
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
    {
        Some(inner) => (true, inner.trim()),
        None => (false, trimmed),
    };

    let mut cleaned: String = body.chars().filter(|c| *c != ',').collect();
    if allow_currency {
        cleaned = cleaned.replacen('$', "", 1);
    }
    // "$-5" leaves "-5", "-$5" leaves "-5"
    if cleaned.is_empty() || cleaned.chars().any(char::is_whitespace) {
        return Err(ValidationError::malformed(field, raw, "not a number"));
    }

    let value = Decimal::from_str(&cleaned)
        .map_err(|e| ValidationError::malformed(field, raw, e.to_string()))?;

    if parenthesized {
        Ok(-value.abs())
    } else {
        Ok(value)
    }
}
