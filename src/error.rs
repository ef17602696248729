use crate::civil::CivilDateTime;
use crate::prelude::*;
use crate::{DateUnit, Instant};

/// Why a civil tuple could not be turned into an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ConstructionReason {
    /// The year/month/day or time fields name no calendar value (e.g. February 30).
    #[display(fmt = "no such calendar date or time")]
    InvalidDate,
    /// The local time was skipped by a time zone transition and the policy rejects gaps.
    #[display(fmt = "local time skipped by a time zone transition")]
    NonexistentLocalTime,
    /// The local time was repeated by a time zone transition and the policy rejects folds.
    #[display(fmt = "local time repeated by a time zone transition")]
    AmbiguousLocalTime,
    /// The civil value is valid but outside the range chrono can represent.
    #[display(fmt = "outside the representable range")]
    OutOfRange,
}

/// Error type for every calendar unit operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The calendar service could not resolve a civil tuple into an instant.
    #[error("Cannot construct {civil} in {time_zone}: {reason}")]
    Construction {
        civil:     CivilDateTime,
        time_zone: String,
        reason:    ConstructionReason,
    },

    /// Fixed-duration stepping left the representable range.
    #[error("Stepping {instant} by one {unit} leaves the representable range")]
    OutOfRange { instant: Instant, unit: DateUnit },

    /// A unit name did not match any known unit.
    #[error("Invalid date unit: {0}")]
    InvalidUnit(String),

    /// A time zone name is not in the IANA database.
    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    /// A strftime pattern could not be rendered.
    #[error("Invalid format pattern: {0}")]
    InvalidFormat(String),

    /// A date string did not match the requested format.
    #[error("Cannot parse {input:?} with format {format:?}")]
    Parse { input: String, format: String },
}

impl Error {
    pub(crate) fn construction(civil: CivilDateTime, time_zone: &str, reason: ConstructionReason) -> Self {
        log::debug!("construction failure for {civil} in {time_zone}: {reason}");
        Self::Construction {
            civil,
            time_zone: time_zone.to_owned(),
            reason,
        }
    }

    /// Returns true for the construction failure kind.
    pub const fn is_construction(&self) -> bool {
        matches!(self, Self::Construction { .. } | Self::OutOfRange { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
