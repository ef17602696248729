//! The civil-calendar contract the unit engines are written against.
//!
//! The engines never decompose or rebuild instants themselves. They ask a
//! [`CivilCalendar`] for civil fields, hand it civil tuples back, and let it
//! decide what a local time means in its zone.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::consts::{DAYS_PER_WEEK, FIRST_DAY, JANUARY};
use crate::prelude::*;
use crate::{ConstructionReason, Error, Instant, Result};

/// Era of a proleptic Gregorian year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum Era {
    /// Year 0 and earlier in astronomical numbering (1 BCE and before)
    #[display(fmt = "BCE")]
    BeforeCommonEra,
    #[display(fmt = "CE")]
    CommonEra,
}

/// A point in time broken into civil fields by a calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CivilFields {
    pub year:            i32,
    pub month:           u32,
    pub day:             u32,
    pub hour:            u32,
    pub minute:          u32,
    pub second:          u32,
    pub nanosecond:      u32,
    pub weekday:         Weekday,
    /// 1-based occurrence of this weekday within the month (the second Tuesday is 2)
    pub weekday_ordinal: u32,
    /// 1-based week of the month, weeks starting on the calendar's first weekday
    pub week_of_month:   u32,
    /// 1-based week of the civil year, weeks starting on the calendar's first weekday
    pub week_of_year:    u32,
    pub quarter:         u32,
    pub era:             Era,
}

impl CivilFields {
    /// The date and clock fields, dropping the derived ones.
    pub const fn date_time(&self) -> CivilDateTime {
        CivilDateTime {
            year:       self.year,
            month:      self.month,
            day:        self.day,
            hour:       self.hour,
            minute:     self.minute,
            second:     self.second,
            nanosecond: self.nanosecond,
        }
    }
}

/// A civil date and time of day to be resolved into an instant.
///
/// Fields are not validated on construction; the calendar rejects impossible
/// combinations when asked to [`reconstruct`](CivilCalendar::reconstruct) them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CivilDateTime {
    pub year:       i32,
    pub month:      u32,
    pub day:        u32,
    pub hour:       u32,
    pub minute:     u32,
    pub second:     u32,
    pub nanosecond: u32,
}

impl CivilDateTime {
    /// Creates a tuple with a zero sub-second field.
    pub const fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanosecond: 0,
        }
    }

    /// Midnight on the given date.
    pub const fn date(year: i32, month: u32, day: u32) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Midnight on January 1 of the given year.
    pub const fn first_of_year(year: i32) -> Self {
        Self::date(year, JANUARY, FIRST_DAY)
    }

    /// Same tuple with the sub-second field replaced.
    #[must_use]
    pub const fn with_nanosecond(self, nanosecond: u32) -> Self {
        Self { nanosecond, ..self }
    }

    /// Same date with the clock replaced.
    #[must_use]
    pub const fn with_time(self, hour: u32, minute: u32, second: u32, nanosecond: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            nanosecond,
            ..self
        }
    }
}

impl fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:09}",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.nanosecond
        )
    }
}

/// The civil calendar, time zone and week conventions the engines consult.
///
/// Implementations must be deterministic for a given value: the engines call
/// them several times within one computation and expect consistent answers.
pub trait CivilCalendar {
    /// Name of the time zone, used in error messages.
    fn time_zone_name(&self) -> &str;

    /// Breaks an instant into civil fields.
    ///
    /// # Errors
    /// Returns `Error::Construction` if the local view of the instant is not
    /// representable.
    fn decompose(&self, instant: Instant) -> Result<CivilFields>;

    /// Resolves a civil tuple into an instant.
    ///
    /// # Errors
    /// Returns `Error::Construction` if the tuple names no date, or names a local
    /// time the calendar's policy refuses to resolve.
    fn reconstruct(&self, civil: CivilDateTime) -> Result<Instant>;

    /// Resolves a civil tuple derived from `reference`, keeping a repeated local
    /// time on the same side of the transition as `reference`.
    ///
    /// Calendars without repeated local times can rely on the default.
    ///
    /// # Errors
    /// See [`reconstruct`](CivilCalendar::reconstruct).
    fn reconstruct_near(&self, civil: CivilDateTime, reference: Instant) -> Result<Instant> {
        let _ = reference;
        self.reconstruct(civil)
    }

    /// The first instant of the civil date, even when local midnight was
    /// skipped or repeated by a transition. Clock fields are ignored.
    ///
    /// # Errors
    /// Returns `Error::Construction` if the date is invalid or its start is not
    /// representable.
    fn start_of_date(&self, date: CivilDateTime) -> Result<Instant>;

    /// The first instant of the civil day containing `instant`.
    ///
    /// # Errors
    /// Returns `Error::Construction` if the day start is not representable.
    fn start_of_day(&self, instant: Instant) -> Result<Instant> {
        let fields = self.decompose(instant)?;
        self.start_of_date(CivilDateTime::date(fields.year, fields.month, fields.day))
    }

    /// Number of days in the given civil month.
    ///
    /// # Errors
    /// Returns `Error::Construction` if the year/month pair is invalid.
    fn days_in_month(&self, year: i32, month: u32) -> Result<u32>;

    /// Whether the calendar treats the instant's civil day as a weekend day.
    ///
    /// # Errors
    /// Returns `Error::Construction` if the local view of the instant is not
    /// representable.
    fn is_weekend(&self, instant: Instant) -> Result<bool>;

    /// The weekday weeks start on.
    fn first_weekday(&self) -> Weekday;

    /// Moves a civil date by whole days, keeping the clock fields.
    ///
    /// # Errors
    /// Returns `Error::Construction` if the date is invalid or the result
    /// leaves the representable range.
    fn add_days(&self, civil: CivilDateTime, days: i64) -> Result<CivilDateTime> {
        let date = NaiveDate::from_ymd_opt(civil.year, civil.month, civil.day).ok_or_else(|| {
            Error::construction(civil, self.time_zone_name(), ConstructionReason::InvalidDate)
        })?;
        let shifted = if days >= 0 {
            date.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            date.checked_sub_days(Days::new(days.unsigned_abs()))
        }
        .ok_or_else(|| Error::construction(civil, self.time_zone_name(), ConstructionReason::OutOfRange))?;
        Ok(CivilDateTime {
            year: shifted.year(),
            month: shifted.month(),
            day: shifted.day(),
            ..civil
        })
    }

    /// Days from the start of the week to `weekday`, in `0..7`.
    fn weekday_index(&self, weekday: Weekday) -> u32 {
        (weekday.num_days_from_monday() + DAYS_PER_WEEK - self.first_weekday().num_days_from_monday())
            % DAYS_PER_WEEK
    }
}

impl<C: CivilCalendar + ?Sized> CivilCalendar for &C {
    fn time_zone_name(&self) -> &str {
        (**self).time_zone_name()
    }

    fn decompose(&self, instant: Instant) -> Result<CivilFields> {
        (**self).decompose(instant)
    }

    fn reconstruct(&self, civil: CivilDateTime) -> Result<Instant> {
        (**self).reconstruct(civil)
    }

    fn reconstruct_near(&self, civil: CivilDateTime, reference: Instant) -> Result<Instant> {
        (**self).reconstruct_near(civil, reference)
    }

    fn start_of_date(&self, date: CivilDateTime) -> Result<Instant> {
        (**self).start_of_date(date)
    }

    fn start_of_day(&self, instant: Instant) -> Result<Instant> {
        (**self).start_of_day(instant)
    }

    fn days_in_month(&self, year: i32, month: u32) -> Result<u32> {
        (**self).days_in_month(year, month)
    }

    fn is_weekend(&self, instant: Instant) -> Result<bool> {
        (**self).is_weekend(instant)
    }

    fn first_weekday(&self) -> Weekday {
        (**self).first_weekday()
    }

    fn add_days(&self, civil: CivilDateTime, days: i64) -> Result<CivilDateTime> {
        (**self).add_days(civil, days)
    }
}
