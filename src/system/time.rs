//! Time keeping module for PineTime

use chrono::{DateTime, NaiveDateTime};
use embassy_time::{Duration, Instant};
use ringface::clock;

/// Wall clock time at a known system instant
#[derive(Clone, Copy)]
pub struct TimeReference {
    /// Clock time (UTC)
    time: NaiveDateTime,
    /// Related system time
    instant: Instant,
}

impl TimeReference {
    /// Create new time reference from a UTC unix timestamp, taken now
    pub fn from_epoch(secs: i64) -> Self {
        Self {
            time: DateTime::from_timestamp(secs, 0)
                .map(|t| t.naive_utc())
                .unwrap_or_default(),
            instant: Instant::now(),
        }
    }
}

/// Local wall clock derived from a reference and the system timer
#[derive(Clone, Copy)]
pub struct TimeManager {
    reference: TimeReference,
    /// Offset of local time to UTC in seconds
    timezone: i32,
}

impl TimeManager {
    /// Initialize time measurement on boot
    pub fn init(reference: TimeReference, timezone: i32) -> Self {
        Self {
            reference,
            timezone,
        }
    }

    /// Get current local time
    pub fn local_time(&self) -> NaiveDateTime {
        let elapsed = Instant::now().duration_since(self.reference.instant);
        let micros = self.reference.time.and_utc().timestamp_micros()
            + elapsed.as_micros() as i64
            + i64::from(self.timezone) * 1_000_000;
        DateTime::from_timestamp_micros(micros)
            .map(|t| t.naive_utc())
            .unwrap_or(self.reference.time)
    }

    /// Time left until the next minute starts
    pub fn until_next_minute(&self) -> Duration {
        Duration::from_millis(clock::millis_until_next_minute(&self.local_time()))
    }
}
