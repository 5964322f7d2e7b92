//! Trading calendar module - holiday sources and trading-day resolution.

mod calendar_traits;
mod nyse_calendar;
mod trading_calendar;

pub use calendar_traits::HolidayCalendarTrait;
pub use nyse_calendar::NyseHolidayCalendar;
pub use trading_calendar::{is_weekend, SessionWindow, TradingCalendar};

#[cfg(test)]
mod trading_calendar_tests;
