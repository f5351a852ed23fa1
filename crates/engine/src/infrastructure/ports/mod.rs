//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Challenge storage (could swap in-memory -> a database)
//! - The event journal (could swap in-memory -> a durable log)
//! - Identifier issuance
//! - Clocks (for testing)

mod error;
mod external;
mod repos;
mod testing;

pub use error::{JournalError, RegistryError};
pub use external::{JournalSink, SequencePort};
pub use repos::{ChallengeRecord, ChallengeRegistry};
pub use testing::{ClockPort, WorldClockPort};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockJournalSink, MockSequencePort};
#[cfg(test)]
pub use repos::MockChallengeRegistry;
#[cfg(test)]
pub use testing::{MockClockPort, MockWorldClockPort};
