//! Counting units between instants and units inside a larger unit.

use crate::civil::CivilCalendar;
use crate::{DateUnit, Instant, Result, boundary, step};

/// Whole nominal units from `from` to `to`, truncated toward zero.
///
/// Negative when `to` is before `from`. Months count as 31 days and years as
/// 365 days, so month and year counts are approximate; use
/// [`count_in_larger_unit`] when an exact calendar count is needed.
pub fn count(unit: DateUnit, from: Instant, to: Instant) -> i64 {
    unit.whole_count_in(to.signed_duration_since(from))
}

/// Fractional nominal units from `from` to `to`.
pub fn precise_count(unit: DateUnit, from: Instant, to: Instant) -> f64 {
    unit.count_in(to.signed_duration_since(from))
}

/// How many `fine` units fit in the `coarse` unit containing `reference`.
///
/// Measures the elapsed time from the start of that `coarse` interval to the
/// start of the next one, so "days in this month" reflects the actual month.
/// Returns 1 when the units are equal and 0 when `fine` is the coarser one.
///
/// # Errors
/// Returns `Error::Construction` if the calendar cannot resolve either
/// interval boundary.
pub fn precise_count_in_larger_unit<C: CivilCalendar + ?Sized>(
    calendar: &C,
    fine: DateUnit,
    coarse: DateUnit,
    reference: Instant,
) -> Result<f64> {
    if fine.is_coarser_than(coarse) {
        return Ok(0.0);
    }
    if fine == coarse {
        return Ok(1.0);
    }
    let start = boundary::start_of(calendar, coarse, reference)?;
    let end = step::next(calendar, coarse, start)?;
    Ok(precise_count(fine, start, end))
}

/// Whole `fine` units in the `coarse` unit containing `reference`.
///
/// The interval measured is always exactly one `coarse` unit, so the
/// fractional count is rounded to the nearest whole number: a month shortened
/// by a daylight saving change still has its full number of days, and twelve
/// months make a year even though no month is 31 nominal days long.
///
/// # Errors
/// See [`precise_count_in_larger_unit`].
pub fn count_in_larger_unit<C: CivilCalendar + ?Sized>(
    calendar: &C,
    fine: DateUnit,
    coarse: DateUnit,
    reference: Instant,
) -> Result<i64> {
    let precise = precise_count_in_larger_unit(calendar, fine, coarse, reference)?;
    #[allow(clippy::cast_possible_truncation)]
    let whole = precise.round() as i64;
    Ok(whole)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{POLICIES, berlin, utc};
    use crate::ZonedCalendar;

    #[test]
    fn test_count_days() {
        let from = utc(2024, 1, 1, 0, 0, 0);
        let to = utc(2024, 1, 3, 0, 0, 0);
        assert_eq!(count(DateUnit::Day, from, to), 2);
        assert_eq!(count(DateUnit::Day, to, from), -2);
        assert_eq!(count(DateUnit::Hour, from, to), 48);
        assert_eq!(count(DateUnit::Week, from, to), 0);
    }

    #[test]
    fn test_count_truncates_toward_zero() {
        let from = utc(2024, 1, 1, 0, 0, 0);
        let to = utc(2024, 1, 2, 23, 59, 59);
        assert_eq!(count(DateUnit::Day, from, to), 1);
        assert_eq!(count(DateUnit::Day, to, from), -1);
        assert!((precise_count(DateUnit::Day, from, utc(2024, 1, 2, 12, 0, 0)) - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_count_months_is_nominal() {
        // 29 days of February is less than one 31-day nominal month
        let from = utc(2024, 2, 1, 0, 0, 0);
        let to = utc(2024, 3, 1, 0, 0, 0);
        assert_eq!(count(DateUnit::Month, from, to), 0);
        assert_eq!(count(DateUnit::Month, from, utc(2024, 3, 3, 0, 0, 0)), 1);
        assert_eq!(count(DateUnit::Year, utc(2023, 1, 1, 0, 0, 0), utc(2024, 1, 1, 0, 0, 0)), 1);
    }

    #[test]
    fn test_count_in_larger_unit_cases() {
        struct TestCase {
            fine:      DateUnit,
            coarse:    DateUnit,
            reference: Instant,
            expected:  i64,
        }

        let cases = [
            TestCase { fine: DateUnit::Day, coarse: DateUnit::Month, reference: utc(2024, 2, 15, 10, 0, 0), expected: 29 },
            TestCase { fine: DateUnit::Day, coarse: DateUnit::Month, reference: utc(2023, 2, 15, 10, 0, 0), expected: 28 },
            TestCase { fine: DateUnit::Day, coarse: DateUnit::Month, reference: utc(2024, 1, 31, 23, 0, 0), expected: 31 },
            TestCase { fine: DateUnit::Day, coarse: DateUnit::Month, reference: utc(2024, 4, 1, 0, 0, 0), expected: 30 },
            TestCase { fine: DateUnit::Day, coarse: DateUnit::Week, reference: utc(2024, 2, 15, 10, 0, 0), expected: 7 },
            TestCase { fine: DateUnit::Day, coarse: DateUnit::Year, reference: utc(2024, 6, 1, 0, 0, 0), expected: 366 },
            TestCase { fine: DateUnit::Day, coarse: DateUnit::Year, reference: utc(2023, 6, 1, 0, 0, 0), expected: 365 },
            TestCase { fine: DateUnit::Hour, coarse: DateUnit::Day, reference: utc(2024, 6, 1, 5, 0, 0), expected: 24 },
            TestCase { fine: DateUnit::Minute, coarse: DateUnit::Hour, reference: utc(2024, 6, 1, 5, 0, 0), expected: 60 },
            TestCase { fine: DateUnit::Second, coarse: DateUnit::Day, reference: utc(2024, 6, 1, 5, 0, 0), expected: 86_400 },
            TestCase { fine: DateUnit::Week, coarse: DateUnit::Year, reference: utc(2024, 6, 1, 0, 0, 0), expected: 52 },
            TestCase { fine: DateUnit::Month, coarse: DateUnit::Year, reference: utc(2023, 6, 1, 0, 0, 0), expected: 12 },
            TestCase { fine: DateUnit::Month, coarse: DateUnit::Day, reference: utc(2024, 6, 1, 0, 0, 0), expected: 0 },
            TestCase { fine: DateUnit::Year, coarse: DateUnit::Second, reference: utc(2024, 6, 1, 0, 0, 0), expected: 0 },
        ];

        let cal = ZonedCalendar::utc();
        for case in &cases {
            assert_eq!(
                count_in_larger_unit(&cal, case.fine, case.coarse, case.reference).unwrap(),
                case.expected,
                "{} in a {}",
                case.fine,
                case.coarse
            );
        }
    }

    #[test]
    fn test_same_unit_is_one() {
        let cal = ZonedCalendar::utc();
        let reference = utc(2024, 2, 15, 10, 0, 0);
        for unit in DateUnit::ALL {
            assert_eq!(count_in_larger_unit(&cal, unit, unit, reference).unwrap(), 1, "{unit}");
        }
    }

    #[test]
    fn test_days_in_every_week_is_seven() {
        let cal = berlin();
        let mut reference = utc(2026, 3, 1, 12, 0, 0);
        for _ in 0..60 {
            assert_eq!(count_in_larger_unit(&cal, DateUnit::Day, DateUnit::Week, reference).unwrap(), 7);
            reference = step::next(&cal, DateUnit::Day, reference).unwrap();
        }
    }

    #[test]
    fn test_month_shortened_by_dst() {
        // March 2024 in Berlin lost an hour, 30.96 elapsed days
        let cal = berlin();
        let reference = utc(2024, 3, 15, 12, 0, 0);
        let precise = precise_count_in_larger_unit(&cal, DateUnit::Day, DateUnit::Month, reference).unwrap();
        assert!(precise < 31.0 && precise > 30.9);
        assert_eq!(count_in_larger_unit(&cal, DateUnit::Day, DateUnit::Month, reference).unwrap(), 31);
        assert_eq!(count_in_larger_unit(&cal, DateUnit::Hour, DateUnit::Month, reference).unwrap(), 743);
    }

    #[test]
    fn test_precise_months_in_year() {
        let cal = ZonedCalendar::utc();
        let precise = precise_count_in_larger_unit(&cal, DateUnit::Month, DateUnit::Year, utc(2023, 6, 1, 0, 0, 0))
            .unwrap();
        assert!((precise - 365.0 / 31.0).abs() < 1e-9);
    }

    #[test]
    fn test_failure_propagates() {
        let tokyo = ZonedCalendar::named("Asia/Tokyo").unwrap();
        let result = count_in_larger_unit(&tokyo, DateUnit::Day, DateUnit::Month, Instant::MAX_UTC);
        assert!(result.unwrap_err().is_construction());
        // Equal or inverted units never consult the calendar
        assert_eq!(count_in_larger_unit(&tokyo, DateUnit::Day, DateUnit::Day, Instant::MAX_UTC).unwrap(), 1);
    }

    #[test]
    fn test_days_in_week_under_any_policy() {
        // The Santiago week of 2024-09-08 starts at 01:00, after a skipped midnight
        let santiago = ZonedCalendar::named("America/Santiago").unwrap();
        for policy in POLICIES {
            let cal = santiago.with_disambiguation(policy);
            let reference = utc(2024, 9, 10, 16, 0, 0);
            assert_eq!(count_in_larger_unit(&cal, DateUnit::Day, DateUnit::Week, reference).unwrap(), 7, "{policy}");
        }
    }
}
