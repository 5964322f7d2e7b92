//! Text formatting for report values.

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{DISPLAY_DECIMAL_PRECISION, DISPLAY_PERCENT_PRECISION, NOT_AVAILABLE};
use crate::delta::{DeltaRecord, PositionStatus};

/// `$1,234.56`, `-$1,234.56`, or `N/A`.
pub fn format_money(value: Option<Decimal>) -> String {
    let Some(value) = value else {
        return NOT_AVAILABLE.to_string();
    };

    let mut rounded = value
        .round_dp_with_strategy(DISPLAY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_DECIMAL_PRECISION);

    let text = rounded.abs().to_string();
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

/// Whole-share delta with an explicit sign: `+1,250`, `-80`, `0`.
///
/// Fractional shares are truncated toward zero.
pub fn format_share_delta(value: Option<Decimal>) -> String {
    let Some(whole) = value.and_then(|v| v.trunc().to_i128()) else {
        return NOT_AVAILABLE.to_string();
    };

    let grouped = group_thousands(&whole.unsigned_abs().to_string());
    match whole.signum() {
        1 => format!("+{}", grouped),
        -1 => format!("-{}", grouped),
        _ => grouped,
    }
}

/// A fraction rendered as a signed percentage: `0.25` -> `+25.0%`.
pub fn format_percent(fraction: Decimal) -> String {
    let rounded = (fraction * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(DISPLAY_PERCENT_PRECISION, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    // -0.0001% rounds to a signed zero
    let rounded = if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    };

    let mut text = rounded.to_string();
    if !text.contains('.') {
        text.push_str(".0");
    }
    if rounded.is_sign_positive() && !rounded.is_zero() {
        text.insert(0, '+');
    }
    text.push('%');
    text
}

/// The change column for one record: `+20 (+25.0%)`, `+50 (new position)`,
/// `-80 (exited)`.
pub fn format_change(record: &DeltaRecord) -> String {
    let delta = format_share_delta(Some(record.share_delta));
    if record.status == PositionStatus::Exited {
        format!("{} (exited)", delta)
    } else if record.is_new_position() {
        format!("{} (new position)", delta)
    } else {
        format!("{} ({})", delta, format_percent(record.pct_change))
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(share_delta: Decimal, pct_change: Decimal, status: PositionStatus) -> DeltaRecord {
        DeltaRecord {
            ticker: "AAPL".to_string(),
            share_delta,
            pct_change,
            weight: dec!(0.05),
            shares: dec!(100),
            previous_shares: Some(dec!(80)),
            status,
        }
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Some(dec!(1234.56))), "$1,234.56");
        assert_eq!(format_money(Some(dec!(-1234.56))), "-$1,234.56");
        assert_eq!(format_money(Some(dec!(1500))), "$1,500.00");
        assert_eq!(format_money(Some(dec!(0.005))), "$0.01");
        assert_eq!(format_money(Some(dec!(1234567.891))), "$1,234,567.89");
        assert_eq!(format_money(Some(Decimal::ZERO)), "$0.00");
        assert_eq!(format_money(None), "N/A");
    }

    #[test]
    fn test_format_share_delta() {
        assert_eq!(format_share_delta(Some(dec!(20))), "+20");
        assert_eq!(format_share_delta(Some(dec!(-80))), "-80");
        assert_eq!(format_share_delta(Some(dec!(1250000))), "+1,250,000");
        assert_eq!(format_share_delta(Some(dec!(-1234.9))), "-1,234");
        assert_eq!(format_share_delta(Some(dec!(0.4))), "0");
        assert_eq!(format_share_delta(Some(Decimal::ZERO)), "0");
        assert_eq!(format_share_delta(None), "N/A");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(0.25)), "+25.0%");
        assert_eq!(format_percent(dec!(-0.25)), "-25.0%");
        assert_eq!(format_percent(dec!(0.1234567)), "+12.346%");
        assert_eq!(format_percent(dec!(-1)), "-100.0%");
        assert_eq!(format_percent(Decimal::ZERO), "0.0%");
        assert_eq!(format_percent(dec!(-0.0000001)), "0.0%");
    }

    #[test]
    fn test_format_change_held() {
        assert_eq!(
            format_change(&record(dec!(20), dec!(0.25), PositionStatus::Held)),
            "+20 (+25.0%)"
        );
        assert_eq!(
            format_change(&record(Decimal::ZERO, Decimal::ZERO, PositionStatus::Held)),
            "0 (0.0%)"
        );
    }

    #[test]
    fn test_format_change_new_position() {
        assert_eq!(
            format_change(&record(dec!(50), Decimal::ZERO, PositionStatus::New)),
            "+50 (new position)"
        );
        // Held with zero previous shares reads the same way
        let mut from_zero = record(dec!(40), Decimal::ZERO, PositionStatus::Held);
        from_zero.previous_shares = Some(Decimal::ZERO);
        assert_eq!(format_change(&from_zero), "+40 (new position)");
    }

    #[test]
    fn test_format_change_tiny_move_on_large_position() {
        let mut held = record(dec!(40), dec!(0.000004), PositionStatus::Held);
        held.previous_shares = Some(dec!(10000000));
        assert_eq!(format_change(&held), "+40 (0.0%)");
    }

    #[test]
    fn test_format_change_exited() {
        assert_eq!(
            format_change(&record(dec!(-80), dec!(-1), PositionStatus::Exited)),
            "-80 (exited)"
        );
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }
}
