//! Rules-based NYSE holiday calendar.
//!
//! Covers the regular full-day closures. One-off closures (national days of
//! mourning, weather) are not predictable and are supplied through
//! [`NyseHolidayCalendar::with_extra_closures`].

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use log::debug;

use super::calendar_traits::HolidayCalendarTrait;
use crate::errors::{CalendarError, Result};

/// First year Juneteenth was observed by the exchange.
const JUNETEENTH_FIRST_YEAR: i32 = 2022;

pub struct NyseHolidayCalendar {
    extra_closures: BTreeSet<NaiveDate>,
    cache: RwLock<HashMap<i32, Arc<BTreeSet<NaiveDate>>>>,
}

impl NyseHolidayCalendar {
    pub fn new() -> Self {
        Self {
            extra_closures: BTreeSet::new(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_extra_closures(mut self, closures: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.extra_closures.extend(closures);
        self
    }

    /// Holidays for `year`, computed once and cached.
    pub fn holidays_for_year(&self, year: i32) -> Result<Arc<BTreeSet<NaiveDate>>> {
        if let Some(cached) = self
            .cache
            .read()
            .map_err(|_| CalendarError::Unavailable("holiday cache poisoned".to_string()))?
            .get(&year)
        {
            return Ok(Arc::clone(cached));
        }

        let holidays = Arc::new(compute_holidays(year)?);
        debug!("Computed {} NYSE holidays for {}", holidays.len(), year);
        self.cache
            .write()
            .map_err(|_| CalendarError::Unavailable("holiday cache poisoned".to_string()))?
            .insert(year, Arc::clone(&holidays));
        Ok(holidays)
    }
}

impl Default for NyseHolidayCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl HolidayCalendarTrait for NyseHolidayCalendar {
    fn exchange(&self) -> &str {
        "XNYS"
    }

    fn is_holiday(&self, date: NaiveDate) -> Result<bool> {
        if self.extra_closures.contains(&date) {
            return Ok(true);
        }
        Ok(self.holidays_for_year(date.year())?.contains(&date))
    }
}

fn compute_holidays(year: i32) -> Result<BTreeSet<NaiveDate>> {
    let invalid = || CalendarError::Unavailable(format!("cannot build calendar for {}", year));
    let ymd = |month: u32, day: u32| NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid);
    let nth = |month: u32, weekday: Weekday, n: u8| {
        NaiveDate::from_weekday_of_month_opt(year, month, weekday, n).ok_or_else(invalid)
    };

    let mut holidays = BTreeSet::new();

    // A Saturday New Year's Day is not moved back into December.
    let new_year = ymd(1, 1)?;
    if new_year.weekday() != Weekday::Sat {
        holidays.insert(observed(new_year));
    }

    holidays.insert(nth(1, Weekday::Mon, 3)?); // Martin Luther King Jr. Day
    holidays.insert(nth(2, Weekday::Mon, 3)?); // Washington's Birthday
    holidays.insert(easter_sunday(year).ok_or_else(invalid)? - Duration::days(2)); // Good Friday
    holidays.insert(last_weekday_of_month(year, 5, Weekday::Mon).ok_or_else(invalid)?); // Memorial Day
    if year >= JUNETEENTH_FIRST_YEAR {
        holidays.insert(observed(ymd(6, 19)?));
    }
    holidays.insert(observed(ymd(7, 4)?)); // Independence Day
    holidays.insert(nth(9, Weekday::Mon, 1)?); // Labor Day
    holidays.insert(nth(11, Weekday::Thu, 4)?); // Thanksgiving
    holidays.insert(observed(ymd(12, 25)?)); // Christmas

    Ok(holidays)
}

/// Saturday holidays close the Friday before, Sunday holidays the Monday after.
fn observed(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date - Duration::days(1),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}

fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let mut day = first_of_next.pred_opt()?;
    while day.weekday() != weekday {
        day = day.pred_opt()?;
    }
    Some(day)
}

/// Gregorian Easter Sunday (anonymous Gregorian algorithm).
fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}
