use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * 60;

/// Elapsed time truncated to whole hours, minutes (< 60) and seconds (< 60).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawHms")]
pub struct Hms {
    hours: u64,
    minutes: u64,
    seconds: u64,
}

// Unnormalized wire form; overflowing minutes and seconds carry upward.
#[derive(Deserialize)]
struct RawHms {
    hours: u64,
    minutes: u64,
    seconds: u64,
}

impl From<RawHms> for Hms {
    fn from(raw: RawHms) -> Self {
        let minutes = raw.minutes.saturating_add(raw.seconds / SECS_PER_MINUTE);
        Self {
            hours: raw.hours.saturating_add(minutes / SECS_PER_MINUTE),
            minutes: minutes % SECS_PER_MINUTE,
            seconds: raw.seconds % SECS_PER_MINUTE,
        }
    }
}

impl Hms {
    pub fn from_whole_secs(secs: u64) -> Self {
        Self {
            hours: secs / SECS_PER_HOUR,
            minutes: secs % SECS_PER_HOUR / SECS_PER_MINUTE,
            seconds: secs % SECS_PER_MINUTE,
        }
    }

    pub fn from_duration(duration: Duration) -> Self {
        Self::from_whole_secs(duration.as_secs())
    }

    /// NaN, infinite and negative inputs are formatted as zero.
    pub fn from_secs_f64(secs: f64) -> Self {
        if !secs.is_finite() || secs < 0.0 {
            warn!(secs, "invalid elapsed seconds, formatting as zero");
            return Self::default();
        }
        Self::from_whole_secs(secs.floor() as u64)
    }

    pub fn hours(&self) -> u64 {
        self.hours
    }

    pub fn minutes(&self) -> u64 {
        self.minutes
    }

    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    /// `None` when the hours do not fit back into a `u64` of seconds.
    pub fn total_seconds(&self) -> Option<u64> {
        self.hours
            .checked_mul(SECS_PER_HOUR)?
            .checked_add(self.minutes * SECS_PER_MINUTE + self.seconds)
    }
}

impl From<Duration> for Hms {
    fn from(duration: Duration) -> Self {
        Self::from_duration(duration)
    }
}

impl fmt::Display for Hms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[h] {}[m] {}[s]", self.hours, self.minutes, self.seconds)
    }
}

pub fn format_elapsed(secs: f64) -> String {
    Hms::from_secs_f64(secs).to_string()
}
