/// Seconds in one minute
pub const SECONDS_PER_MINUTE: i64 = 60;
/// Seconds in one hour
pub const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
/// Seconds in one elapsed (not civil) day
pub const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
/// Seconds in one elapsed week
pub const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;

/// Nominal month length used by elapsed-time counting.
/// Inexact: most months are shorter.
pub const NOMINAL_DAYS_PER_MONTH: i64 = 31;
/// Nominal year length used by elapsed-time counting.
/// Inexact: leap years are longer.
pub const NOMINAL_DAYS_PER_YEAR: i64 = 365;

/// Nanoseconds in one second
pub const NANOS_PER_SECOND: i128 = 1_000_000_000;
/// Largest sub-second value carried by an end-of-unit boundary
pub const MAX_NANOSECOND: u32 = 999_999_999;

/// Last minute of an hour
pub const LAST_MINUTE: u32 = 59;
/// Last second of a minute
pub const LAST_SECOND: u32 = 59;

/// First day of a month
pub const FIRST_DAY: u32 = 1;
/// Month number for January
pub const JANUARY: u32 = 1;
/// Month number for December
pub const DECEMBER: u32 = 12;
/// Months in a civil year
pub const MONTHS_PER_YEAR: i32 = 12;
/// Months in a quarter
pub const MONTHS_PER_QUARTER: u32 = 3;
/// Days in a week
pub const DAYS_PER_WEEK: u32 = 7;

/// Lookahead used to find the offsets on either side of a DST transition.
/// Assumes a zone never has two transitions within this window.
pub(crate) const TRANSITION_PROBE_HOURS: i64 = 24;

/// Time zone used when neither configuration nor `TZ` names one
pub const DEFAULT_TIME_ZONE: &str = "UTC";
