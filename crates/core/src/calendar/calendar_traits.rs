use chrono::NaiveDate;

use crate::errors::Result;

/// Source of exchange holidays (full-day closures only).
pub trait HolidayCalendarTrait: Send + Sync {
    /// Short name of the exchange this calendar describes, for logs.
    fn exchange(&self) -> &str;

    /// Whether the exchange is closed all day on `date` for a holiday.
    /// Weekends are handled by the resolver and need not be reported.
    fn is_holiday(&self, date: NaiveDate) -> Result<bool>;
}
