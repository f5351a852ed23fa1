//! Domain entities - Core business objects with identity

mod journal_entry;
mod ownership_challenge;

pub use journal_entry::{JournalDraft, JournalEntry, JournalEventType};
pub use ownership_challenge::{ChallengeStatus, OwnershipChallenge};
