//! Testability ports for injecting wall-clock and in-game time.

use chrono::{DateTime, Utc};
use suzerain_domain::GameDate;

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The in-game calendar.
#[cfg_attr(test, mockall::automock)]
pub trait WorldClockPort: Send + Sync {
    fn current_date(&self) -> GameDate;

    /// Move one season forward and return the new date.
    fn advance_season(&self) -> GameDate;
}
