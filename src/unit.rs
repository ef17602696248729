use std::str::FromStr;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::consts::{
    NANOS_PER_SECOND, NOMINAL_DAYS_PER_MONTH, NOMINAL_DAYS_PER_YEAR, SECONDS_PER_DAY, SECONDS_PER_HOUR,
    SECONDS_PER_MINUTE, SECONDS_PER_WEEK,
};
use crate::prelude::*;
use crate::Error;

/// A calendar granularity, ordered from finest (`Second`) to coarsest (`Year`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateUnit {
    #[display(fmt = "second")]
    Second,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "week")]
    Week,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
}

/// Finest clock field kept by a sub-day boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClockField {
    Hour,
    Minute,
    Second,
}

/// How the boundary engine locates the interval containing an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Anchor {
    /// Keep the date and the clock down to the given field.
    Clock(ClockField),
    /// The civil day, with a DST-aware start.
    Day,
    /// The week beginning on the calendar's first weekday.
    Week,
    /// Day one of the civil month.
    Month,
    /// January first of the civil year.
    Year,
}

/// How the stepping engine moves by one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Elapsed seconds, applied to the instant without consulting the calendar.
    Fixed(i64),
    /// Whole civil months, day-of-month clamped in the target month.
    Months(i32),
}

/// Everything the engines need to know about one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UnitRule {
    pub anchor:          Anchor,
    pub step:            Step,
    pub nominal_seconds: i64,
}

impl DateUnit {
    /// Every unit, finest first.
    pub const ALL: [Self; 7] = [
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Year,
    ];

    /// The per-unit boundary, step and nominal-length table.
    pub(crate) const fn rule(self) -> UnitRule {
        match self {
            Self::Second => UnitRule {
                anchor:          Anchor::Clock(ClockField::Second),
                step:            Step::Fixed(1),
                nominal_seconds: 1,
            },
            Self::Minute => UnitRule {
                anchor:          Anchor::Clock(ClockField::Minute),
                step:            Step::Fixed(SECONDS_PER_MINUTE),
                nominal_seconds: SECONDS_PER_MINUTE,
            },
            Self::Hour => UnitRule {
                anchor:          Anchor::Clock(ClockField::Hour),
                step:            Step::Fixed(SECONDS_PER_HOUR),
                nominal_seconds: SECONDS_PER_HOUR,
            },
            Self::Day => UnitRule {
                anchor:          Anchor::Day,
                step:            Step::Fixed(SECONDS_PER_DAY),
                nominal_seconds: SECONDS_PER_DAY,
            },
            Self::Week => UnitRule {
                anchor:          Anchor::Week,
                step:            Step::Fixed(SECONDS_PER_WEEK),
                nominal_seconds: SECONDS_PER_WEEK,
            },
            Self::Month => UnitRule {
                anchor:          Anchor::Month,
                step:            Step::Months(1),
                nominal_seconds: NOMINAL_DAYS_PER_MONTH * SECONDS_PER_DAY,
            },
            Self::Year => UnitRule {
                anchor:          Anchor::Year,
                step:            Step::Months(12),
                nominal_seconds: NOMINAL_DAYS_PER_YEAR * SECONDS_PER_DAY,
            },
        }
    }

    /// Returns true if `self` is strictly finer than `other`.
    #[inline]
    pub fn is_finer_than(self, other: Self) -> bool {
        self < other
    }

    /// Returns true if `self` is strictly coarser than `other`.
    #[inline]
    pub fn is_coarser_than(self, other: Self) -> bool {
        self > other
    }

    /// Returns true if one unit always spans the same elapsed time.
    /// Months and years vary with the calendar.
    pub const fn is_fixed(self) -> bool {
        matches!(self.rule().step, Step::Fixed(_))
    }

    /// The exact elapsed length of one unit, or `None` for months and years.
    pub fn fixed_duration(self) -> Option<TimeDelta> {
        match self.rule().step {
            Step::Fixed(secs) => TimeDelta::try_seconds(secs),
            Step::Months(_) => None,
        }
    }

    /// The nominal elapsed length of one unit: exact up to weeks,
    /// 31 days for a month and 365 days for a year.
    pub fn nominal_duration(self) -> TimeDelta {
        TimeDelta::seconds(self.rule().nominal_seconds)
    }

    /// Number of nominal units in an elapsed duration.
    pub fn count_in(self, elapsed: TimeDelta) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let nanos = total_nanos(elapsed) as f64;
        #[allow(clippy::cast_precision_loss)]
        let unit = (i128::from(self.rule().nominal_seconds) * NANOS_PER_SECOND) as f64;
        nanos / unit
    }

    /// Number of whole nominal units in an elapsed duration, truncated toward zero.
    pub fn whole_count_in(self, elapsed: TimeDelta) -> i64 {
        let unit = i128::from(self.rule().nominal_seconds) * NANOS_PER_SECOND;
        // |elapsed| is bounded by chrono's range, so the quotient fits.
        #[allow(clippy::cast_possible_truncation)]
        let whole = (total_nanos(elapsed) / unit) as i64;
        whole
    }
}

fn total_nanos(delta: TimeDelta) -> i128 {
    i128::from(delta.num_seconds()) * NANOS_PER_SECOND + i128::from(delta.subsec_nanos())
}

impl FromStr for DateUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.trim().to_ascii_lowercase().as_str() {
            "s" | "sec" | "secs" | "second" | "seconds" => Self::Second,
            "min" | "mins" | "minute" | "minutes" => Self::Minute,
            "h" | "hr" | "hrs" | "hour" | "hours" => Self::Hour,
            "d" | "day" | "days" => Self::Day,
            "w" | "wk" | "week" | "weeks" => Self::Week,
            "mo" | "month" | "months" => Self::Month,
            "y" | "yr" | "year" | "years" => Self::Year,
            _ => return Err(Error::InvalidUnit(s.to_owned())),
        };
        Ok(unit)
    }
}
