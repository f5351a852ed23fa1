//! Wall-clock and in-game clock implementations.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use suzerain_domain::GameDate;

use crate::infrastructure::ports::{ClockPort, WorldClockPort};

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Season-granular world clock, advanced once per turn.
pub struct SeasonalClock {
    date: Mutex<GameDate>,
}

impl SeasonalClock {
    pub fn starting_at(date: GameDate) -> Self {
        Self {
            date: Mutex::new(date),
        }
    }
}

impl WorldClockPort for SeasonalClock {
    fn current_date(&self) -> GameDate {
        *self.date.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn advance_season(&self) -> GameDate {
        let mut date = self.date.lock().unwrap_or_else(PoisonError::into_inner);
        let next = date.advanced();
        *date = next;
        tracing::info!(date = %next, "World clock advanced");
        next
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
