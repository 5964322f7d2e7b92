use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;

use super::*;
use crate::errors::{CalendarError, Error, Result};

struct FixedHolidays(HashSet<NaiveDate>);

impl HolidayCalendarTrait for FixedHolidays {
    fn exchange(&self) -> &str {
        "TEST"
    }

    fn is_holiday(&self, date: NaiveDate) -> Result<bool> {
        Ok(self.0.contains(&date))
    }
}

/// Reports every day as a holiday, like a corrupted feed would.
struct AlwaysClosed;

impl HolidayCalendarTrait for AlwaysClosed {
    fn exchange(&self) -> &str {
        "TEST"
    }

    fn is_holiday(&self, _date: NaiveDate) -> Result<bool> {
        Ok(true)
    }
}

struct Unreachable;

impl HolidayCalendarTrait for Unreachable {
    fn exchange(&self) -> &str {
        "TEST"
    }

    fn is_holiday(&self, _date: NaiveDate) -> Result<bool> {
        Err(CalendarError::Unavailable("feed down".to_string()).into())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn calendar_with(holidays: &[NaiveDate]) -> TradingCalendar {
    TradingCalendar::new(Arc::new(FixedHolidays(holidays.iter().copied().collect())))
}

#[test]
fn test_monday_resolves_to_friday() {
    let calendar = calendar_with(&[]);
    // Monday 2024-03-11
    assert_eq!(
        calendar.previous_trading_day(date(2024, 3, 11)).unwrap(),
        date(2024, 3, 8)
    );
}

#[test]
fn test_monday_after_friday_holiday_resolves_to_thursday() {
    // Good Friday 2024-03-29
    let calendar = calendar_with(&[date(2024, 3, 29)]);
    assert_eq!(
        calendar.previous_trading_day(date(2024, 4, 1)).unwrap(),
        date(2024, 3, 28)
    );
}

#[test]
fn test_midweek_resolves_to_previous_day() {
    let calendar = calendar_with(&[]);
    assert_eq!(
        calendar.previous_trading_day(date(2024, 3, 13)).unwrap(),
        date(2024, 3, 12)
    );
}

#[test]
fn test_weekend_run_date_resolves_to_friday() {
    let calendar = calendar_with(&[]);
    assert_eq!(
        calendar.previous_trading_day(date(2024, 3, 10)).unwrap(),
        date(2024, 3, 8)
    );
    assert_eq!(
        calendar.previous_trading_day(date(2024, 3, 9)).unwrap(),
        date(2024, 3, 8)
    );
}

#[test]
fn test_tuesday_after_monday_holiday_skips_long_weekend() {
    // Presidents' Day 2024-02-19
    let calendar = calendar_with(&[date(2024, 2, 19)]);
    assert_eq!(
        calendar.previous_trading_day(date(2024, 2, 20)).unwrap(),
        date(2024, 2, 16)
    );
}

#[test]
fn test_lookback_is_bounded() {
    let calendar = TradingCalendar::new(Arc::new(AlwaysClosed));
    let err = calendar.previous_trading_day(date(2024, 3, 11)).unwrap_err();
    assert!(matches!(
        err,
        Error::Calendar(CalendarError::NoTradingDayFound {
            lookback_days: 10,
            ..
        })
    ));
}

#[test]
fn test_custom_lookback_bound() {
    // Friday is a holiday, Monday lookback of 2 only reaches Saturday
    let calendar = calendar_with(&[date(2024, 3, 8)]).with_max_lookback(2);
    assert!(calendar.previous_trading_day(date(2024, 3, 11)).is_err());
    let calendar = calendar.with_max_lookback(4);
    assert_eq!(
        calendar.previous_trading_day(date(2024, 3, 11)).unwrap(),
        date(2024, 3, 7)
    );
}

#[test]
fn test_holiday_source_errors_propagate() {
    let calendar = TradingCalendar::new(Arc::new(Unreachable));
    assert!(matches!(
        calendar.previous_trading_day(date(2024, 3, 12)),
        Err(Error::Calendar(CalendarError::Unavailable(_)))
    ));
}

#[test]
fn test_weekends_are_never_trading_days() {
    let calendar = calendar_with(&[]);
    assert!(!calendar.is_trading_day(date(2024, 3, 9)).unwrap());
    assert!(!calendar.is_trading_day(date(2024, 3, 10)).unwrap());
    assert!(calendar.is_trading_day(date(2024, 3, 11)).unwrap());
}

#[test]
fn test_session_window_on_tuesday() {
    let calendar = calendar_with(&[]);
    let window = calendar.session_window(date(2024, 3, 12)).unwrap();
    assert_eq!(window.current, date(2024, 3, 11));
    assert_eq!(window.previous, date(2024, 3, 8));
}

#[test]
fn test_session_window_with_nyse_calendar_over_thanksgiving() {
    let calendar = TradingCalendar::new(Arc::new(NyseHolidayCalendar::new()));
    // Run on Friday after Thanksgiving 2024
    let window = calendar.session_window(date(2024, 11, 29)).unwrap();
    assert_eq!(window.current, date(2024, 11, 27));
    assert_eq!(window.previous, date(2024, 11, 26));
}
