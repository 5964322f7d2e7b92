/// Decimal places kept for parsed weight fractions
pub const PERCENT_PRECISION: u32 = 5;

/// Decimal places shown for formatted percentages
pub const DISPLAY_PERCENT_PRECISION: u32 = 3;

/// Decimal places for money display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Maximum number of calendar days walked back when resolving a trading day.
/// A full week plus a long holiday weekend fits comfortably.
pub const MAX_LOOKBACK_DAYS: u32 = 10;

/// Marker pandas-style exports write into empty ticker cells
pub const NOT_A_NUMBER_MARKER: &str = "nan";

/// Date format used in report headers and by the published feed
pub const REPORT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Sentinel for absent numeric values in reports
pub const NOT_AVAILABLE: &str = "N/A";

/// Cash-like identifiers used when none are configured
pub const DEFAULT_CASH_TICKERS: &[&str] = &["CASH", "BLACKROCK TREASURY TRUST INSTL 62"];
