use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_TIME_ZONE;
use crate::{Disambiguation, Result, ZonedCalendar};

/// Serializable description of a [`ZonedCalendar`].
///
/// Missing fields take their defaults, so `{}` describes a UTC calendar with
/// Sunday-first weeks and a Saturday/Sunday weekend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// IANA zone name
    pub time_zone:      String,
    pub first_weekday:  Weekday,
    pub weekend:        Vec<Weekday>,
    pub disambiguation: Disambiguation,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            time_zone:      DEFAULT_TIME_ZONE.to_owned(),
            first_weekday:  Weekday::Sun,
            weekend:        vec![Weekday::Sat, Weekday::Sun],
            disambiguation: Disambiguation::default(),
        }
    }
}

impl ZonedCalendar {
    /// Builds a calendar from its configuration.
    ///
    /// # Errors
    /// Returns `Error::UnknownTimeZone` if `time_zone` is not an IANA name.
    pub fn from_config(config: &CalendarConfig) -> Result<Self> {
        let calendar = Self::named(&config.time_zone)?
            .with_first_weekday(config.first_weekday)
            .with_weekend(&config.weekend)
            .with_disambiguation(config.disambiguation);
        log::debug!(
            "calendar {} (weeks from {}, {} local times)",
            config.time_zone,
            config.first_weekday,
            config.disambiguation
        );
        Ok(calendar)
    }
}

impl TryFrom<&CalendarConfig> for ZonedCalendar {
    type Error = crate::Error;

    fn try_from(config: &CalendarConfig) -> Result<Self> {
        Self::from_config(config)
    }
}
