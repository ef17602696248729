//! Moving an instant by whole units.

use chrono::TimeDelta;

use crate::civil::{CivilCalendar, CivilDateTime};
use crate::consts::MONTHS_PER_YEAR;
use crate::unit::Step;
use crate::{ConstructionReason, DateUnit, Error, Instant, Result};

/// The instant one `unit` after `instant`.
///
/// # Errors
/// Returns `Error::Construction` if a month or year step cannot be resolved
/// by the calendar, or `Error::OutOfRange` if the result is not representable.
pub fn next<C: CivilCalendar + ?Sized>(calendar: &C, unit: DateUnit, instant: Instant) -> Result<Instant> {
    advance(calendar, unit, instant, 1)
}

/// The instant one `unit` before `instant`.
///
/// # Errors
/// See [`next`].
pub fn previous<C: CivilCalendar + ?Sized>(calendar: &C, unit: DateUnit, instant: Instant) -> Result<Instant> {
    advance(calendar, unit, instant, -1)
}

/// Moves `instant` by `amount` units, backwards when negative.
///
/// Seconds through weeks are elapsed time added to the instant. Months and
/// years move the civil month and year while keeping the day and clock; a day
/// missing from the target month is clamped to that month's last day, so
/// January 31 plus one month is the last day of February.
///
/// # Errors
/// See [`next`].
pub fn advance<C: CivilCalendar + ?Sized>(
    calendar: &C,
    unit: DateUnit,
    instant: Instant,
    amount: i32,
) -> Result<Instant> {
    log::trace!("advance {instant} by {amount} {unit} in {}", calendar.time_zone_name());
    match unit.rule().step {
        Step::Fixed(seconds) => seconds
            .checked_mul(i64::from(amount))
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| instant.checked_add_signed(delta))
            .ok_or(Error::OutOfRange { instant, unit }),
        Step::Months(months) => add_months(calendar, instant, i64::from(months) * i64::from(amount)),
    }
}

fn add_months<C: CivilCalendar + ?Sized>(calendar: &C, instant: Instant, months: i64) -> Result<Instant> {
    let civil = calendar.decompose(instant)?.date_time();
    let out_of_range = || Error::construction(civil, calendar.time_zone_name(), ConstructionReason::OutOfRange);

    let total = i64::from(civil.year) * i64::from(MONTHS_PER_YEAR) + i64::from(civil.month) - 1 + months;
    let year = i32::try_from(total.div_euclid(i64::from(MONTHS_PER_YEAR))).map_err(|_| out_of_range())?;
    let month = u32::try_from(total.rem_euclid(i64::from(MONTHS_PER_YEAR)) + 1).map_err(|_| out_of_range())?;

    let day = civil.day.min(calendar.days_in_month(year, month)?);
    calendar.reconstruct(CivilDateTime { year, month, day, ..civil })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{berlin, utc, utc_nanos};
    use crate::ZonedCalendar;

    #[test]
    fn test_fixed_steps_cases() {
        struct TestCase {
            unit:     DateUnit,
            next:     Instant,
            previous: Instant,
        }

        let instant = utc(2024, 2, 28, 23, 59, 59);
        let cases = [
            TestCase {
                unit:     DateUnit::Second,
                next:     utc(2024, 2, 29, 0, 0, 0),
                previous: utc(2024, 2, 28, 23, 59, 58),
            },
            TestCase {
                unit:     DateUnit::Minute,
                next:     utc(2024, 2, 29, 0, 0, 59),
                previous: utc(2024, 2, 28, 23, 58, 59),
            },
            TestCase {
                unit:     DateUnit::Hour,
                next:     utc(2024, 2, 29, 0, 59, 59),
                previous: utc(2024, 2, 28, 22, 59, 59),
            },
            TestCase {
                unit:     DateUnit::Day,
                next:     utc(2024, 2, 29, 23, 59, 59),
                previous: utc(2024, 2, 27, 23, 59, 59),
            },
            TestCase {
                unit:     DateUnit::Week,
                next:     utc(2024, 3, 6, 23, 59, 59),
                previous: utc(2024, 2, 21, 23, 59, 59),
            },
        ];

        let cal = ZonedCalendar::utc();
        for case in &cases {
            assert_eq!(next(&cal, case.unit, instant).unwrap(), case.next, "next {}", case.unit);
            assert_eq!(previous(&cal, case.unit, instant).unwrap(), case.previous, "previous {}", case.unit);
        }
    }

    #[test]
    fn test_fixed_steps_ignore_civil_time() {
        // A day step is 24 elapsed hours, even across the spring-forward night
        let cal = berlin();
        let before = utc(2026, 3, 28, 11, 0, 0);
        let after = next(&cal, DateUnit::Day, before).unwrap();
        assert_eq!(after, utc(2026, 3, 29, 11, 0, 0));
        assert_eq!(cal.decompose(after).unwrap().hour, 13);
    }

    #[test]
    fn test_fixed_steps_are_reversible() {
        let cal = berlin();
        let instant = utc_nanos(2026, 10, 25, 0, 30, 0, 42);
        for unit in DateUnit::ALL.into_iter().filter(|u| u.is_fixed()) {
            let forward = next(&cal, unit, instant).unwrap();
            assert_eq!(previous(&cal, unit, forward).unwrap(), instant, "{unit}");
            let backward = previous(&cal, unit, instant).unwrap();
            assert_eq!(next(&cal, unit, backward).unwrap(), instant, "{unit}");
        }
    }

    #[test]
    fn test_year_steps() {
        let cal = ZonedCalendar::utc();
        assert_eq!(next(&cal, DateUnit::Year, utc(2023, 6, 15, 0, 0, 0)).unwrap(), utc(2024, 6, 15, 0, 0, 0));
        assert_eq!(previous(&cal, DateUnit::Year, utc(2023, 6, 15, 8, 0, 0)).unwrap(), utc(2022, 6, 15, 8, 0, 0));
    }

    #[test]
    fn test_month_steps_keep_day_and_clock() {
        let cal = ZonedCalendar::utc();
        let instant = utc_nanos(2023, 12, 15, 9, 45, 30, 7);
        assert_eq!(next(&cal, DateUnit::Month, instant).unwrap(), utc_nanos(2024, 1, 15, 9, 45, 30, 7));
        let jan = utc(2024, 1, 15, 9, 45, 30);
        assert_eq!(previous(&cal, DateUnit::Month, jan).unwrap(), utc(2023, 12, 15, 9, 45, 30));
    }

    #[test]
    fn test_month_steps_clamp_to_last_day() {
        let cal = ZonedCalendar::utc();
        assert_eq!(next(&cal, DateUnit::Month, utc(2023, 1, 31, 12, 0, 0)).unwrap(), utc(2023, 2, 28, 12, 0, 0));
        assert_eq!(next(&cal, DateUnit::Month, utc(2024, 1, 31, 12, 0, 0)).unwrap(), utc(2024, 2, 29, 12, 0, 0));
        assert_eq!(previous(&cal, DateUnit::Month, utc(2024, 3, 31, 0, 0, 0)).unwrap(), utc(2024, 2, 29, 0, 0, 0));
        assert_eq!(next(&cal, DateUnit::Year, utc(2024, 2, 29, 0, 0, 0)).unwrap(), utc(2025, 2, 28, 0, 0, 0));

        // Clamping loses the starting day, so the step does not undo itself
        let back = previous(&cal, DateUnit::Month, utc(2023, 2, 28, 12, 0, 0)).unwrap();
        assert_eq!(back, utc(2023, 1, 28, 12, 0, 0));
    }

    #[test]
    fn test_month_steps_use_local_fields() {
        // 00:30 on March 31 in Berlin is still March 30 in UTC
        let cal = berlin();
        let instant = utc(2024, 3, 30, 23, 30, 0);
        let stepped = next(&cal, DateUnit::Month, instant).unwrap();
        let fields = cal.decompose(stepped).unwrap();
        assert_eq!((fields.month, fields.day, fields.hour, fields.minute), (4, 30, 0, 30));
    }

    #[test]
    fn test_month_step_into_gap_follows_policy() {
        // 00:30 on 2024-08-08 in Santiago; a month later 00:30 was skipped
        let cal = ZonedCalendar::named("America/Santiago").unwrap();
        let instant = utc(2024, 8, 8, 4, 30, 0);
        assert_eq!(next(&cal, DateUnit::Month, instant).unwrap(), utc(2024, 9, 8, 4, 30, 0));

        let strict = cal.with_disambiguation(crate::Disambiguation::Reject);
        assert!(matches!(
            next(&strict, DateUnit::Month, instant),
            Err(Error::Construction {
                reason: ConstructionReason::NonexistentLocalTime,
                ..
            })
        ));
    }

    #[test]
    fn test_advance_many() {
        let cal = ZonedCalendar::utc();
        let instant = utc(2024, 1, 31, 0, 0, 0);
        assert_eq!(advance(&cal, DateUnit::Month, instant, 13).unwrap(), utc(2025, 2, 28, 0, 0, 0));
        assert_eq!(advance(&cal, DateUnit::Month, instant, -2).unwrap(), utc(2023, 11, 30, 0, 0, 0));
        assert_eq!(advance(&cal, DateUnit::Hour, instant, -25).unwrap(), utc(2024, 1, 29, 23, 0, 0));
        assert_eq!(advance(&cal, DateUnit::Week, instant, 0).unwrap(), instant);
    }

    #[test]
    fn test_out_of_range() {
        let cal = ZonedCalendar::utc();
        let result = next(&cal, DateUnit::Second, Instant::MAX_UTC);
        assert!(matches!(result, Err(Error::OutOfRange { unit: DateUnit::Second, .. })));
        assert!(advance(&cal, DateUnit::Year, Instant::MAX_UTC, 1).is_err());

        // Local time in Tokyo is already past the last representable date
        let tokyo = ZonedCalendar::named("Asia/Tokyo").unwrap();
        assert!(next(&tokyo, DateUnit::Month, Instant::MAX_UTC).unwrap_err().is_construction());
    }
}
