use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Timezone of the exchange whose sessions the feed follows.
/// This is the canonical timezone used to turn "now" into a run date.
pub const DEFAULT_EXCHANGE_TZ: Tz = chrono_tz::America::New_York;

/// Converts a UTC instant to a calendar date in the given timezone.
///
/// A run started shortly after midnight UTC still belongs to the previous
/// New York day, which matters when picking the session window.
pub fn exchange_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Convenience function that uses the default exchange timezone.
pub fn exchange_date_today() -> NaiveDate {
    exchange_date_from_utc(Utc::now(), DEFAULT_EXCHANGE_TZ)
}
