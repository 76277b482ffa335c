//! Daily wake-time computation
//!
//! The scheduler recomputes its delay from the current wall clock on every
//! iteration instead of accumulating intervals, so the next wake always lands
//! on the configured time of day no matter how long the previous cycle took
//! or where within the day the process was started.

use chrono::{Duration as ChronoDuration, NaiveTime};
use std::time::Duration;

/// Immutable schedule settings, supplied at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Wall-clock time of day (local) the cycle runs at
    pub time_of_day: NaiveTime,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            // 04:00:00 is always a valid wall-clock time
            time_of_day: NaiveTime::from_hms_opt(4, 0, 0).expect("valid default time"),
        }
    }
}

impl ScheduleConfig {
    /// Creates a schedule for the given time of day
    pub fn new(time_of_day: NaiveTime) -> Self {
        Self { time_of_day }
    }
}

/// Computes the delay from `now` until the next occurrence of `target`.
///
/// The result is always in `[0, 24h)` and satisfies
/// `now + delay ≡ target (mod 24h)`: if the target time is still ahead today
/// the delay lands on it today, otherwise it rolls to tomorrow.
pub fn delay_until(target: NaiveTime, now: NaiveTime) -> Duration {
    let mut delta = target.signed_duration_since(now);

    if delta < ChronoDuration::zero() {
        delta += ChronoDuration::days(1);
    }

    delta.to_std().unwrap_or(Duration::ZERO)
}
