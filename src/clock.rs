//! Minute boundaries

use chrono::{NaiveDateTime, Timelike};

const MINUTE_MS: u64 = 60_000;

/// Milliseconds from `now` until the next minute starts, at least 1
pub fn millis_until_next_minute(now: &NaiveDateTime) -> u64 {
    let elapsed_ms = u64::from(now.second()) * 1_000 + u64::from(now.nanosecond() / 1_000_000);
    MINUTE_MS.saturating_sub(elapsed_ms).max(1)
}
