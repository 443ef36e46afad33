// Cache module
//
// Derived values shown in the report: TTL breakdowns, elapsed time since the
// X-HW-Cache-* timestamps, and Cache-Control interpretation.

pub mod control;

pub use control::CacheControl;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// A TTL expressed in seconds, whole minutes and whole hours.
///
/// Minutes and hours use integer division, so 7230 seconds is 120 minutes
/// and 2 hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TtlBreakdown {
    pub seconds: i64,
    pub minutes: i64,
    pub hours: i64,
}

impl TtlBreakdown {
    pub fn from_seconds(seconds: i64) -> Self {
        Self {
            seconds,
            minutes: seconds / SECONDS_PER_MINUTE,
            hours: seconds / SECONDS_PER_HOUR,
        }
    }
}

/// Seconds elapsed between a unix timestamp and `now`.
///
/// Negative when the timestamp lies in the future (clock skew on the edge).
/// The timestamp comes straight from a response header, so results beyond
/// the `i64` range clamp to its bounds.
pub fn elapsed_since(now: DateTime<Utc>, epoch_seconds: i64) -> i64 {
    now.timestamp().saturating_sub(epoch_seconds)
}

/// Render seconds as `1h2m3s` / `2m3s` / `3s`.
pub fn format_seconds(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let total = seconds.unsigned_abs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{sign}{hours}h{minutes}m{secs}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m{secs}s")
    } else {
        format!("{sign}{secs}s")
    }
}
