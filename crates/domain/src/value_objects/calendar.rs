//! In-game calendar: the realm advances one season per turn.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

// ============================================================================
// Season
// ============================================================================

/// The four seasons of the year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Returns the display name for this season.
    pub fn display_name(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }

    /// The following season, and whether the year rolls over.
    pub fn next(self) -> (Season, bool) {
        match self {
            Season::Spring => (Season::Summer, false),
            Season::Summer => (Season::Autumn, false),
            Season::Autumn => (Season::Winter, false),
            Season::Winter => (Season::Spring, true),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Season {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" | "0" => Ok(Season::Spring),
            "summer" | "1" => Ok(Season::Summer),
            "autumn" | "fall" | "2" => Ok(Season::Autumn),
            "winter" | "3" => Ok(Season::Winter),
            other => Err(DomainError::validation(format!("Unknown season: {other}"))),
        }
    }
}

// ============================================================================
// GameDate
// ============================================================================

/// Year and season as read from the world clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameDate {
    pub year: u32,
    pub season: Season,
}

impl GameDate {
    pub fn new(year: u32, season: Season) -> Self {
        Self { year, season }
    }

    /// The date one season later.
    pub fn advanced(self) -> Self {
        let (season, rolls_over) = self.season.next();
        let year = if rolls_over {
            self.year.saturating_add(1)
        } else {
            self.year
        };
        Self { year, season }
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.season, self.year)
    }
}
