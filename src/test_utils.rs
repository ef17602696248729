//! Shared fixtures for the unit tests.

use chrono::{TimeZone, Timelike, Utc};

use crate::{Disambiguation, Instant, ZonedCalendar};

/// Every disambiguation policy, for tests that must hold regardless of policy.
pub const POLICIES: [Disambiguation; 4] = [
    Disambiguation::Compatible,
    Disambiguation::Earlier,
    Disambiguation::Later,
    Disambiguation::Reject,
];

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Instant {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, second).unwrap()
}

pub fn utc_nanos(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32, nanos: u32) -> Instant {
    utc(year, month, day, hour, minute, second).with_nanosecond(nanos).unwrap()
}

/// Last representable instant of the given UTC second.
pub fn utc_end(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Instant {
    utc_nanos(year, month, day, hour, minute, second, 999_999_999)
}

pub fn berlin() -> ZonedCalendar {
    ZonedCalendar::named("Europe/Berlin").unwrap()
}
