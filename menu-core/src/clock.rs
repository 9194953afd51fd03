use chrono::Local;
use std::fmt::Debug;

use crate::model::TimeSnapshot;

pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> TimeSnapshot;
}

/// Reads the machine's local clock and timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimeSnapshot {
        read_local_time()
    }
}

/// Always returns the same snapshot.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub TimeSnapshot);

impl Clock for FixedClock {
    fn now(&self) -> TimeSnapshot {
        self.0
    }
}

pub fn read_local_time() -> TimeSnapshot {
    TimeSnapshot::from_datetime(&Local::now())
}
