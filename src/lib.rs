//! Unit-based calendar arithmetic.
//!
//! Answers questions like "when does this week start?", "what is one month
//! after this instant?" and "how many days are in this month?" for seven
//! granularities, from [`DateUnit::Second`] to [`DateUnit::Year`].
//!
//! All civil-calendar knowledge (field decomposition, time zones, week
//! conventions) comes from a [`CivilCalendar`] passed to every operation.
//! [`ZonedCalendar`] implements it on top of chrono and chrono-tz.
//!
//! ```
//! use calendar_units::{DateUnit, InstantExt, ZonedCalendar, count_in_larger_unit};
//!
//! let cal = ZonedCalendar::named("Europe/Berlin").unwrap();
//! let instant = cal.parse("2024-02-15 10:30", "%Y-%m-%d %H:%M").unwrap();
//!
//! let start = instant.start_of(DateUnit::Week, &cal).unwrap();
//! assert_eq!(cal.format(start, "%a %Y-%m-%d %H:%M").unwrap(), "Sun 2024-02-11 00:00");
//!
//! assert_eq!(count_in_larger_unit(&cal, DateUnit::Day, DateUnit::Month, instant).unwrap(), 29);
//! ```

mod boundary;
mod civil;
mod config;
mod consts;
mod count;
mod error;
mod ext;
mod prelude;
mod step;
mod unit;
mod zoned;

#[cfg(test)]
mod test_utils;

pub use boundary::{bounds, end_of, start_of};
pub use civil::{CivilCalendar, CivilDateTime, CivilFields, Era};
pub use config::CalendarConfig;
pub use consts::*;
pub use count::{count, count_in_larger_unit, precise_count, precise_count_in_larger_unit};
pub use error::{ConstructionReason, Error, Result};
pub use ext::{InstantExt, date_with_ymd, date_with_ymd_hms, is_same_day, today, tomorrow, yesterday};
pub use step::{advance, next, previous};
pub use unit::DateUnit;
pub use zoned::{Disambiguation, ZonedCalendar};

pub use chrono::{TimeDelta, Weekday};
pub use chrono_tz::Tz;

/// An absolute point in time. Civil fields exist only relative to a calendar.
pub type Instant = chrono::DateTime<chrono::Utc>;

/// Signed elapsed time with no calendar context.
pub type Duration = chrono::TimeDelta;
