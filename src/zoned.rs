use std::fmt::Write as _;

use chrono::{
    DateTime, Datelike, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone,
    Timelike, Utc, Weekday,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::civil::{CivilCalendar, CivilDateTime, CivilFields, Era};
use crate::consts::{DAYS_PER_WEEK, DEFAULT_TIME_ZONE, FIRST_DAY, MONTHS_PER_QUARTER, TRANSITION_PROBE_HOURS};
use crate::prelude::*;
use crate::{ConstructionReason, Error, Instant, Result};

/// What to do with a local time that a time zone transition skipped or repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disambiguation {
    /// Repeated times take the earlier instant, skipped times are pushed
    /// forward by the length of the gap.
    #[default]
    #[display(fmt = "compatible")]
    Compatible,
    /// Always the earlier of the two candidate instants.
    #[display(fmt = "earlier")]
    Earlier,
    /// Always the later of the two candidate instants.
    #[display(fmt = "later")]
    Later,
    /// Refuse to resolve; the operation fails with a construction error.
    #[display(fmt = "reject")]
    Reject,
}

/// Set of weekdays, one bit per day counted from Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct WeekdayMask(u8);

impl WeekdayMask {
    fn from_days(days: &[Weekday]) -> Self {
        Self(days.iter().fold(0, |mask, day| mask | (1 << day.num_days_from_monday())))
    }

    fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }
}

/// A Gregorian calendar in an IANA time zone, backed by chrono and chrono-tz.
///
/// Defaults: weeks start on Sunday, Saturday and Sunday are the weekend, and
/// local times are disambiguated with [`Disambiguation::Compatible`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonedCalendar {
    tz:             Tz,
    first_weekday:  Weekday,
    weekend:        WeekdayMask,
    disambiguation: Disambiguation,
}

impl ZonedCalendar {
    /// Creates a calendar for the given zone with default week conventions.
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            first_weekday: Weekday::Sun,
            weekend: WeekdayMask::from_days(&[Weekday::Sat, Weekday::Sun]),
            disambiguation: Disambiguation::default(),
        }
    }

    /// A UTC calendar with default week conventions.
    pub fn utc() -> Self {
        Self::new(Tz::UTC)
    }

    /// Creates a calendar for an IANA zone name such as `"Europe/Berlin"`.
    ///
    /// # Errors
    /// Returns `Error::UnknownTimeZone` if the name is not in the database.
    pub fn named(name: &str) -> Result<Self> {
        let tz = name
            .trim()
            .parse::<Tz>()
            .map_err(|_| Error::UnknownTimeZone(name.to_owned()))?;
        Ok(Self::new(tz))
    }

    /// The calendar of the running process: the zone named by `TZ`, or UTC.
    ///
    /// Meant for the outermost caller only. Library code should take a
    /// calendar as a parameter instead of calling this.
    pub fn system() -> Self {
        match std::env::var("TZ") {
            Ok(name) if !name.trim().is_empty() => Self::named(name.trim_start_matches(':')).unwrap_or_else(|err| {
                log::warn!("{err}; falling back to {DEFAULT_TIME_ZONE}");
                Self::utc()
            }),
            _ => Self::utc(),
        }
    }

    /// Same calendar with weeks starting on `weekday`.
    #[must_use]
    pub const fn with_first_weekday(mut self, weekday: Weekday) -> Self {
        self.first_weekday = weekday;
        self
    }

    /// Same calendar with a different set of weekend days.
    #[must_use]
    pub fn with_weekend(mut self, days: &[Weekday]) -> Self {
        self.weekend = WeekdayMask::from_days(days);
        self
    }

    /// Same calendar with a different policy for skipped and repeated local times.
    #[must_use]
    pub const fn with_disambiguation(mut self, disambiguation: Disambiguation) -> Self {
        self.disambiguation = disambiguation;
        self
    }

    /// The IANA zone this calendar reads local times in.
    pub const fn time_zone(&self) -> Tz {
        self.tz
    }

    /// Policy applied to skipped and repeated local times.
    pub const fn disambiguation(&self) -> Disambiguation {
        self.disambiguation
    }

    /// The instant viewed as a local date-time in this calendar's zone.
    pub fn to_local(&self, instant: Instant) -> DateTime<Tz> {
        instant.with_timezone(&self.tz)
    }

    /// Formats the instant's local time with a chrono strftime pattern.
    ///
    /// # Errors
    /// Returns `Error::InvalidFormat` if the pattern has unknown specifiers or
    /// asks for fields the local time cannot supply.
    /// Returns `Error::Construction` if the local time is not representable.
    pub fn format(&self, instant: Instant, pattern: &str) -> Result<String> {
        self.local_view(instant)?;
        let mut out = String::new();
        write!(out, "{}", self.to_local(instant).format(pattern))
            .map_err(|_| Error::InvalidFormat(pattern.to_owned()))?;
        Ok(out)
    }

    /// Parses a local date or date-time in this calendar's zone.
    ///
    /// Patterns without clock fields parse to local midnight. The parsed civil
    /// value is resolved like any other reconstruction, so skipped or repeated
    /// local times follow the calendar's disambiguation policy.
    ///
    /// # Errors
    /// Returns `Error::Parse` if the input does not match, or
    /// `Error::Construction` if the local time cannot be resolved.
    pub fn parse(&self, input: &str, pattern: &str) -> Result<Instant> {
        let local = NaiveDateTime::parse_from_str(input, pattern)
            .or_else(|_| NaiveDate::parse_from_str(input, pattern).map(|date| date.and_time(NaiveTime::MIN)))
            .map_err(|_| Error::Parse {
                input:  input.to_owned(),
                format: pattern.to_owned(),
            })?;
        self.reconstruct(civil_of(&local))
    }

    /// The instant's local date-time, checked against the representable range.
    fn local_view(&self, instant: Instant) -> Result<NaiveDateTime> {
        let utc = instant.naive_utc();
        let offset = self.tz.offset_from_utc_datetime(&utc).fix();
        utc.checked_add_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
            .ok_or_else(|| Error::construction(civil_of(&utc), self.time_zone_name(), ConstructionReason::OutOfRange))
    }

    fn naive(&self, civil: CivilDateTime) -> Result<NaiveDateTime> {
        NaiveDate::from_ymd_opt(civil.year, civil.month, civil.day)
            .and_then(|date| date.and_hms_nano_opt(civil.hour, civil.minute, civil.second, civil.nanosecond))
            .ok_or_else(|| Error::construction(civil, self.time_zone_name(), ConstructionReason::InvalidDate))
    }

    fn resolve(&self, civil: CivilDateTime, local: NaiveDateTime, policy: Disambiguation) -> Result<Instant> {
        let resolved = match self.tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(earlier, later) => match policy {
                Disambiguation::Compatible | Disambiguation::Earlier => earlier,
                Disambiguation::Later => later,
                Disambiguation::Reject => {
                    return Err(Error::construction(
                        civil,
                        self.time_zone_name(),
                        ConstructionReason::AmbiguousLocalTime,
                    ));
                }
            },
            LocalResult::None => {
                let probe = TimeDelta::hours(TRANSITION_PROBE_HOURS);
                return match policy {
                    // Reading the local time with the offset in force before the
                    // gap lands after it, and vice versa.
                    Disambiguation::Compatible | Disambiguation::Later => self.across_gap(civil, local, -probe),
                    Disambiguation::Earlier => self.across_gap(civil, local, probe),
                    Disambiguation::Reject => Err(Error::construction(
                        civil,
                        self.time_zone_name(),
                        ConstructionReason::NonexistentLocalTime,
                    )),
                };
            }
        };
        Ok(resolved.with_timezone(&Utc))
    }

    /// Interprets a skipped local time with the offset in force `probe` away from it.
    fn across_gap(&self, civil: CivilDateTime, local: NaiveDateTime, probe: TimeDelta) -> Result<Instant> {
        let out_of_range = || Error::construction(civil, self.time_zone_name(), ConstructionReason::OutOfRange);
        let offset = local
            .checked_add_signed(probe)
            .and_then(|near| self.tz.from_local_datetime(&near).earliest())
            .map(|dt| dt.offset().fix())
            .ok_or_else(out_of_range)?;
        let utc = local
            .checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
            .ok_or_else(out_of_range)?;
        log::trace!("{civil} falls in a transition gap in {}; resolved with offset {offset}", self.tz);
        Ok(Utc.from_utc_datetime(&utc))
    }
}

impl Default for ZonedCalendar {
    fn default() -> Self {
        Self::utc()
    }
}

fn civil_of(local: &NaiveDateTime) -> CivilDateTime {
    CivilDateTime {
        year:       local.year(),
        month:      local.month(),
        day:        local.day(),
        hour:       local.hour(),
        minute:     local.minute(),
        second:     local.second(),
        nanosecond: local.nanosecond(),
    }
}

/// 1-based week number of the `day`-th day (1-based) of a period, given the
/// week index of that day.
const fn week_number(day: u32, weekday_index: u32) -> u32 {
    let first_index = (weekday_index + DAYS_PER_WEEK - (day - 1) % DAYS_PER_WEEK) % DAYS_PER_WEEK;
    (day - 1 + first_index) / DAYS_PER_WEEK + 1
}

impl CivilCalendar for ZonedCalendar {
    fn time_zone_name(&self) -> &str {
        self.tz.name()
    }

    fn decompose(&self, instant: Instant) -> Result<CivilFields> {
        let local = self.local_view(instant)?;
        let date = local.date();
        let weekday = date.weekday();
        let index = self.weekday_index(weekday);
        let (is_ce, _) = date.year_ce();

        Ok(CivilFields {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            hour: local.hour(),
            minute: local.minute(),
            second: local.second(),
            nanosecond: local.nanosecond(),
            weekday,
            weekday_ordinal: (date.day() - 1) / DAYS_PER_WEEK + 1,
            week_of_month: week_number(date.day(), index),
            week_of_year: week_number(date.ordinal(), index),
            quarter: (date.month() - 1) / MONTHS_PER_QUARTER + 1,
            era: if is_ce { Era::CommonEra } else { Era::BeforeCommonEra },
        })
    }

    fn reconstruct(&self, civil: CivilDateTime) -> Result<Instant> {
        self.resolve(civil, self.naive(civil)?, self.disambiguation)
    }

    fn reconstruct_near(&self, civil: CivilDateTime, reference: Instant) -> Result<Instant> {
        let local = self.naive(civil)?;
        if let LocalResult::Ambiguous(earlier, later) = self.tz.from_local_datetime(&local) {
            let offset = self.tz.offset_from_utc_datetime(&reference.naive_utc()).fix();
            if let Some(same_pass) = [earlier, later].into_iter().find(|dt| dt.offset().fix() == offset) {
                return Ok(same_pass.with_timezone(&Utc));
            }
        }
        self.resolve(civil, local, self.disambiguation)
    }

    fn start_of_date(&self, date: CivilDateTime) -> Result<Instant> {
        let midnight = CivilDateTime::date(date.year, date.month, date.day);
        // Independent of the configured policy: a day always has a first instant.
        // Compatible takes the first pass of a repeated midnight and the end of a
        // skipped one.
        self.resolve(midnight, self.naive(midnight)?, Disambiguation::Compatible)
    }

    fn days_in_month(&self, year: i32, month: u32) -> Result<u32> {
        let civil = CivilDateTime::date(year, month, FIRST_DAY);
        let first = NaiveDate::from_ymd_opt(year, month, FIRST_DAY)
            .ok_or_else(|| Error::construction(civil, self.time_zone_name(), ConstructionReason::InvalidDate))?;
        first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map(|last| last.day())
            .ok_or_else(|| Error::construction(civil, self.time_zone_name(), ConstructionReason::OutOfRange))
    }

    fn is_weekend(&self, instant: Instant) -> Result<bool> {
        Ok(self.weekend.contains(self.local_view(instant)?.weekday()))
    }

    fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }
}
