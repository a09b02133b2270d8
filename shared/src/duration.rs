//! Elapsed time between two yard timestamps
//!
//! Times are wall-clock `HH:MM` values without a date, so a stay that crosses
//! midnight cannot be measured and reads as unavailable.

use chrono::NaiveTime;
use serde::{Serialize, Serializer};

/// Elapsed time, or the dash shown when it cannot be computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elapsed {
    Available { hours: u32, minutes: u32 },
    Unavailable,
}

impl Elapsed {
    pub fn from_minutes(total: u32) -> Self {
        Elapsed::Available {
            hours: total / 60,
            minutes: total % 60,
        }
    }

    pub fn total_minutes(&self) -> Option<u32> {
        match self {
            Elapsed::Available { hours, minutes } => Some(hours * 60 + minutes),
            Elapsed::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Elapsed::Available { .. })
    }
}

impl std::fmt::Display for Elapsed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Elapsed::Available { hours, minutes } => write!(f, "{}h {}m", hours, minutes),
            Elapsed::Unavailable => write!(f, "-"),
        }
    }
}

impl Serialize for Elapsed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse a 24-hour `HH:MM` value; blank or malformed input yields `None`
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

/// Time from `start` to `end` on the same day
pub fn duration(start: Option<&str>, end: Option<&str>) -> Elapsed {
    let (start, end) = match (
        start.and_then(parse_time_of_day),
        end.and_then(parse_time_of_day),
    ) {
        (Some(start), Some(end)) => (start, end),
        _ => return Elapsed::Unavailable,
    };

    if end < start {
        return Elapsed::Unavailable;
    }

    let minutes = end.signed_duration_since(start).num_minutes();
    u32::try_from(minutes)
        .map(Elapsed::from_minutes)
        .unwrap_or(Elapsed::Unavailable)
}
