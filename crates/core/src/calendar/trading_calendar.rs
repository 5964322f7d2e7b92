use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use log::debug;
use serde::Serialize;

use super::calendar_traits::HolidayCalendarTrait;
use crate::constants::MAX_LOOKBACK_DAYS;
use crate::errors::{CalendarError, Result};

/// The pair of sessions a run compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionWindow {
    pub previous: NaiveDate,
    pub current: NaiveDate,
}

/// Resolves trading days against a holiday source.
#[derive(Clone)]
pub struct TradingCalendar {
    holidays: Arc<dyn HolidayCalendarTrait>,
    max_lookback_days: u32,
}

impl TradingCalendar {
    pub fn new(holidays: Arc<dyn HolidayCalendarTrait>) -> Self {
        Self {
            holidays,
            max_lookback_days: MAX_LOOKBACK_DAYS,
        }
    }

    pub fn with_max_lookback(mut self, days: u32) -> Self {
        self.max_lookback_days = days;
        self
    }

    pub fn is_trading_day(&self, date: NaiveDate) -> Result<bool> {
        if is_weekend(date) {
            return Ok(false);
        }
        Ok(!self.holidays.is_holiday(date)?)
    }

    /// The closest trading day strictly before `date`.
    ///
    /// Walks back one calendar day at a time, skipping weekends and
    /// holidays. Gives up after the configured lookback so a broken holiday
    /// source cannot loop forever.
    pub fn previous_trading_day(&self, date: NaiveDate) -> Result<NaiveDate> {
        let mut candidate = date;
        for _ in 0..self.max_lookback_days {
            candidate = match candidate.pred_opt() {
                Some(day) => day,
                None => break,
            };
            if self.is_trading_day(candidate)? {
                return Ok(candidate);
            }
            debug!(
                "{} is not a {} trading day, stepping back",
                candidate,
                self.holidays.exchange()
            );
        }
        Err(CalendarError::NoTradingDayFound {
            from: date,
            lookback_days: self.max_lookback_days,
        }
        .into())
    }

    /// The two most recent completed sessions before `run_date`.
    pub fn session_window(&self, run_date: NaiveDate) -> Result<SessionWindow> {
        let current = self.previous_trading_day(run_date)?;
        let previous = self.previous_trading_day(current)?;
        Ok(SessionWindow { previous, current })
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
