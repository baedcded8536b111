//! Time keeping module for PineTime

use core::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, NaiveDateTime, TimeDelta};
use embassy_time::Instant;
use simplday::{time::decode_cts, Error, TickSource};

/// Cleared once the watch face unsubscribes from the minute tick
pub static TICKS_ENABLED: AtomicBool = AtomicBool::new(true);

pub struct TimeReference {
    /// Clock time
    time: NaiveDateTime,
    /// Related system time
    instant: Instant,
}

impl TimeReference {
    /// Create new time reference from a local epoch timestamp, taken now
    pub fn from_timestamp(secs: i64) -> Self {
        Self {
            time: DateTime::from_timestamp(secs, 0)
                .map(|t| t.naive_utc())
                .unwrap_or(NaiveDateTime::UNIX_EPOCH),
            instant: Instant::now(),
        }
    }

    /// Create new time reference from Current Time Service data
    pub fn from_cts_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self {
            time: decode_cts(bytes)?,
            instant: Instant::now(),
        })
    }
}

pub struct TimeManager {
    reference: TimeReference,
}

impl TimeManager {
    /// Initialize time measurement on boot
    pub fn init(reference: TimeReference) -> Self {
        Self { reference }
    }

    /// Get current time
    pub fn get_time(&self) -> NaiveDateTime {
        let elapsed = Instant::now().duration_since(self.reference.instant);
        self.reference
            .time
            .checked_add_signed(TimeDelta::microseconds(elapsed.as_micros() as i64))
            .unwrap_or(self.reference.time)
    }

    /// Update time reference
    pub fn set_time(&mut self, reference: TimeReference) {
        self.reference = reference;
    }
}

/// Minute tick subscription of the watch face
pub struct MinuteTicks;

impl TickSource for MinuteTicks {
    fn unsubscribe(&mut self) {
        TICKS_ENABLED.store(false, Ordering::Relaxed);
    }
}

pub fn ticks_enabled() -> bool {
    TICKS_ENABLED.load(Ordering::Relaxed)
}
