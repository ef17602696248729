//! First and last instants of the unit interval containing an instant.

use chrono::TimeDelta;

use crate::civil::{CivilCalendar, CivilDateTime, CivilFields};
use crate::consts::{DAYS_PER_WEEK, DECEMBER, FIRST_DAY, LAST_MINUTE, LAST_SECOND, MAX_NANOSECOND};
use crate::unit::{Anchor, ClockField};
use crate::{DateUnit, Error, Instant, Result};

/// Earliest instant of the `unit` interval containing `instant`.
///
/// Days, weeks, months and years start at the first instant of their first
/// civil date, whatever the calendar's disambiguation policy. Seconds, minutes
/// and hours inside a repeated local hour stay on the pass `instant` is in.
///
/// # Errors
/// Returns `Error::Construction` if the calendar cannot resolve the boundary.
pub fn start_of<C: CivilCalendar + ?Sized>(calendar: &C, unit: DateUnit, instant: Instant) -> Result<Instant> {
    log::trace!("start of {unit} containing {instant} in {}", calendar.time_zone_name());
    let fields = calendar.decompose(instant)?;

    match unit.rule().anchor {
        Anchor::Clock(field) => calendar.reconstruct_near(truncate(fields.date_time(), field), instant),
        Anchor::Day => calendar.start_of_date(midnight(&fields)),
        Anchor::Week => calendar.start_of_date(week_start(calendar, &fields)?),
        Anchor::Month => calendar.start_of_date(CivilDateTime::date(fields.year, fields.month, FIRST_DAY)),
        Anchor::Year => calendar.start_of_date(CivilDateTime::first_of_year(fields.year)),
    }
}

/// Latest instant of the `unit` interval containing `instant`.
///
/// Seconds, minutes and hours end on the largest sub-second value of their
/// last second. Days and coarser units end one nanosecond before the next
/// interval starts, so consecutive intervals never overlap or leave a gap.
///
/// # Errors
/// Returns `Error::Construction` if the calendar cannot resolve the boundary.
pub fn end_of<C: CivilCalendar + ?Sized>(calendar: &C, unit: DateUnit, instant: Instant) -> Result<Instant> {
    log::trace!("end of {unit} containing {instant} in {}", calendar.time_zone_name());
    let fields = calendar.decompose(instant)?;

    let following = match unit.rule().anchor {
        Anchor::Clock(field) => return calendar.reconstruct_near(saturate(fields.date_time(), field), instant),
        Anchor::Day => calendar.add_days(midnight(&fields), 1)?,
        Anchor::Week => calendar.add_days(week_start(calendar, &fields)?, i64::from(DAYS_PER_WEEK))?,
        Anchor::Month => {
            let days = calendar.days_in_month(fields.year, fields.month)?;
            calendar.add_days(CivilDateTime::date(fields.year, fields.month, days), 1)?
        }
        Anchor::Year => {
            let days = calendar.days_in_month(fields.year, DECEMBER)?;
            calendar.add_days(CivilDateTime::date(fields.year, DECEMBER, days), 1)?
        }
    };
    calendar
        .start_of_date(following)?
        .checked_sub_signed(TimeDelta::nanoseconds(1))
        .ok_or(Error::OutOfRange { instant, unit })
}

/// Both boundaries of the `unit` interval containing `instant`.
///
/// # Errors
/// Returns `Error::Construction` if either boundary cannot be resolved.
pub fn bounds<C: CivilCalendar + ?Sized>(
    calendar: &C,
    unit: DateUnit,
    instant: Instant,
) -> Result<(Instant, Instant)> {
    Ok((start_of(calendar, unit, instant)?, end_of(calendar, unit, instant)?))
}

const fn midnight(fields: &CivilFields) -> CivilDateTime {
    CivilDateTime::date(fields.year, fields.month, fields.day)
}

/// First civil date of the week containing `fields`.
fn week_start<C: CivilCalendar + ?Sized>(calendar: &C, fields: &CivilFields) -> Result<CivilDateTime> {
    let back = i64::from(calendar.weekday_index(fields.weekday));
    calendar.add_days(midnight(fields), -back)
}

const fn truncate(civil: CivilDateTime, keep: ClockField) -> CivilDateTime {
    match keep {
        ClockField::Second => civil.with_nanosecond(0),
        ClockField::Minute => civil.with_time(civil.hour, civil.minute, 0, 0),
        ClockField::Hour => civil.with_time(civil.hour, 0, 0, 0),
    }
}

const fn saturate(civil: CivilDateTime, keep: ClockField) -> CivilDateTime {
    match keep {
        ClockField::Second => civil.with_nanosecond(MAX_NANOSECOND),
        ClockField::Minute => civil.with_time(civil.hour, civil.minute, LAST_SECOND, MAX_NANOSECOND),
        ClockField::Hour => civil.with_time(civil.hour, LAST_MINUTE, LAST_SECOND, MAX_NANOSECOND),
    }
}
