//! Method-call surface over the engines, and thin clock and construction helpers.

use chrono::{TimeDelta, Utc};

use crate::civil::{CivilCalendar, CivilDateTime, CivilFields};
use crate::consts::SECONDS_PER_DAY;
use crate::{DateUnit, Instant, Result, boundary, count, step};

/// The current instant.
pub fn today() -> Instant {
    Utc::now()
}

/// The current instant minus one elapsed day.
pub fn yesterday() -> Instant {
    today() - TimeDelta::seconds(SECONDS_PER_DAY)
}

/// The current instant plus one elapsed day.
pub fn tomorrow() -> Instant {
    today() + TimeDelta::seconds(SECONDS_PER_DAY)
}

/// Midnight on the given civil date.
///
/// # Errors
/// Returns `Error::Construction` if the date does not exist or midnight cannot
/// be resolved in the calendar's zone.
pub fn date_with_ymd<C: CivilCalendar + ?Sized>(calendar: &C, year: i32, month: u32, day: u32) -> Result<Instant> {
    calendar.reconstruct(CivilDateTime::date(year, month, day))
}

/// The given civil date and time of day.
///
/// # Errors
/// See [`date_with_ymd`].
pub fn date_with_ymd_hms<C: CivilCalendar + ?Sized>(
    calendar: &C,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Result<Instant> {
    calendar.reconstruct(CivilDateTime::new(year, month, day, hour, minute, second))
}

/// Whether two instants fall on the same civil day of `calendar`.
///
/// # Errors
/// Returns `Error::Construction` if either instant has no local view.
pub fn is_same_day<C: CivilCalendar + ?Sized>(calendar: &C, a: Instant, b: Instant) -> Result<bool> {
    let a = calendar.decompose(a)?;
    let b = calendar.decompose(b)?;
    Ok((a.year, a.month, a.day) == (b.year, b.month, b.day))
}

/// Unit arithmetic as methods on [`Instant`], with the calendar passed explicitly.
///
/// ```
/// use calendar_units::{DateUnit, InstantExt, ZonedCalendar};
///
/// let cal = ZonedCalendar::utc();
/// let instant = calendar_units::date_with_ymd_hms(&cal, 2024, 2, 15, 10, 30, 0).unwrap();
/// let start = instant.start_of(DateUnit::Month, &cal).unwrap();
/// assert_eq!(start.to_rfc3339(), "2024-02-01T00:00:00+00:00");
/// ```
pub trait InstantExt: Sized {
    /// See [`boundary::start_of`].
    ///
    /// # Errors
    /// Returns `Error::Construction` if the boundary cannot be resolved.
    fn start_of<C: CivilCalendar + ?Sized>(self, unit: DateUnit, calendar: &C) -> Result<Instant>;

    /// See [`boundary::end_of`].
    ///
    /// # Errors
    /// Returns `Error::Construction` if the boundary cannot be resolved.
    fn end_of<C: CivilCalendar + ?Sized>(self, unit: DateUnit, calendar: &C) -> Result<Instant>;

    /// See [`step::next`].
    ///
    /// # Errors
    /// Returns an error if the stepped instant cannot be resolved or represented.
    fn next<C: CivilCalendar + ?Sized>(self, unit: DateUnit, calendar: &C) -> Result<Instant>;

    /// See [`step::previous`].
    ///
    /// # Errors
    /// Returns an error if the stepped instant cannot be resolved or represented.
    fn previous<C: CivilCalendar + ?Sized>(self, unit: DateUnit, calendar: &C) -> Result<Instant>;

    /// Whole nominal units from `self` to `to`. See [`count::count`].
    fn count(self, unit: DateUnit, to: Instant) -> i64;

    /// Fractional nominal units from `self` to `to`.
    fn precise_count(self, unit: DateUnit, to: Instant) -> f64;

    /// Civil fields of `self` in `calendar`.
    ///
    /// # Errors
    /// Returns `Error::Construction` if the local view is not representable.
    fn components<C: CivilCalendar + ?Sized>(self, calendar: &C) -> Result<CivilFields>;

    /// Whether `self` falls on one of the calendar's weekend days.
    ///
    /// # Errors
    /// Returns `Error::Construction` if the local view is not representable.
    fn is_weekend<C: CivilCalendar + ?Sized>(self, calendar: &C) -> Result<bool>;

    /// Whether `self` falls outside the calendar's weekend.
    ///
    /// # Errors
    /// See [`InstantExt::is_weekend`].
    fn is_weekday<C: CivilCalendar + ?Sized>(self, calendar: &C) -> Result<bool> {
        self.is_weekend(calendar).map(|weekend| !weekend)
    }

    /// Whether `self` is on the current civil day.
    ///
    /// # Errors
    /// See [`is_same_day`].
    fn is_today<C: CivilCalendar + ?Sized>(self, calendar: &C) -> Result<bool>;

    /// Whether `self` is on the civil day of [`tomorrow`].
    ///
    /// # Errors
    /// See [`is_same_day`].
    fn is_tomorrow<C: CivilCalendar + ?Sized>(self, calendar: &C) -> Result<bool>;

    /// Whether `self` is on the civil day of [`yesterday`].
    ///
    /// # Errors
    /// See [`is_same_day`].
    fn is_yesterday<C: CivilCalendar + ?Sized>(self, calendar: &C) -> Result<bool>;
}

impl InstantExt for Instant {
    fn start_of<C: CivilCalendar + ?Sized>(self, unit: DateUnit, calendar: &C) -> Result<Instant> {
        boundary::start_of(calendar, unit, self)
    }

    fn end_of<C: CivilCalendar + ?Sized>(self, unit: DateUnit, calendar: &C) -> Result<Instant> {
        boundary::end_of(calendar, unit, self)
    }

    fn next<C: CivilCalendar + ?Sized>(self, unit: DateUnit, calendar: &C) -> Result<Instant> {
        step::next(calendar, unit, self)
    }

    fn previous<C: CivilCalendar + ?Sized>(self, unit: DateUnit, calendar: &C) -> Result<Instant> {
        step::previous(calendar, unit, self)
    }

    fn count(self, unit: DateUnit, to: Instant) -> i64 {
        count::count(unit, self, to)
    }

    fn precise_count(self, unit: DateUnit, to: Instant) -> f64 {
        count::precise_count(unit, self, to)
    }

    fn components<C: CivilCalendar + ?Sized>(self, calendar: &C) -> Result<CivilFields> {
        calendar.decompose(self)
    }

    fn is_weekend<C: CivilCalendar + ?Sized>(self, calendar: &C) -> Result<bool> {
        calendar.is_weekend(self)
    }

    fn is_today<C: CivilCalendar + ?Sized>(self, calendar: &C) -> Result<bool> {
        is_same_day(calendar, self, today())
    }

    fn is_tomorrow<C: CivilCalendar + ?Sized>(self, calendar: &C) -> Result<bool> {
        is_same_day(calendar, self, tomorrow())
    }

    fn is_yesterday<C: CivilCalendar + ?Sized>(self, calendar: &C) -> Result<bool> {
        is_same_day(calendar, self, yesterday())
    }
}
