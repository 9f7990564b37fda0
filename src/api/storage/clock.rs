//! Time sources for store-generated timestamps.

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::models::Timestamp;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall clock that never hands out the same millisecond twice.
///
/// Successive stamps from one process are strictly increasing, so an update
/// issued right after a create still advances `updatedAt`.
#[derive(Debug, Default)]
pub struct SystemClock {
    last_millis: AtomicI64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let wall = Utc::now().timestamp_millis();
        let mut previous = self.last_millis.load(Ordering::Relaxed);
        loop {
            let next = wall.max(previous + 1);
            match self.last_millis.compare_exchange_weak(
                previous,
                next,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => {
                    return DateTime::from_timestamp_millis(next)
                        .map(Timestamp::from)
                        .unwrap_or_else(|| Timestamp::from(Utc::now()));
                }
                Err(current) => previous = current,
            }
        }
    }
}

/// Hand-driven clock for deterministic tests.
///
/// Returns the current instant and then moves forward by `step`.
#[derive(Debug)]
pub struct ManualClock {
    state: Mutex<(DateTime<Utc>, Duration)>,
}

impl ManualClock {
    /// A clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self::stepping(start, Duration::zero())
    }

    /// A clock that advances by `step` after every reading.
    pub fn stepping(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            state: Mutex::new((start, step)),
        }
    }

    /// Jump to an arbitrary instant, backwards included.
    pub fn set(&self, instant: DateTime<Utc>) {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        state.0 = instant;
    }

    pub fn advance(&self, by: Duration) {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        state.0 += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let (current, step) = *state;
        state.0 = current + step;
        Timestamp::from(current)
    }
}
