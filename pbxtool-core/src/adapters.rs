//! Default port implementations.

use crate::ports::Clock;
use chrono::{Duration, Local, NaiveDateTime};
use std::sync::atomic::{AtomicI64, Ordering};

/// Local time from the operating system.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Deterministic clock for embedding and testing.
///
/// Returns `start` on the first call and advances one second per call after
/// that, so consecutive backups never share a stamp.
#[derive(Debug)]
pub struct SteppingClock {
    start: NaiveDateTime,
    calls: AtomicI64,
}

impl SteppingClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            start,
            calls: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> NaiveDateTime {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::seconds(n)
    }
}
