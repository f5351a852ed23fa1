//! Ports to collaborators outside the authority core: the event journal and
//! identifier issuance.

use async_trait::async_trait;
use suzerain_domain::{ActorId, ChallengeId, JournalEntry, JournalEntryId};

use super::error::JournalError;

// =============================================================================
// Event Journal
// =============================================================================

/// Append-only sink for notification records.
///
/// The core never mutates an entry after submission.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JournalSink: Send + Sync {
    async fn submit(&self, entry: JournalEntry) -> Result<(), JournalError>;

    /// Entries addressed to `actor`, directly or by broadcast, in id order.
    async fn entries_for(&self, actor: &ActorId) -> Result<Vec<JournalEntry>, JournalError>;
}

// =============================================================================
// Identifier Issuance
// =============================================================================

/// Monotonic, never-repeating identifiers, safe under concurrent callers.
#[cfg_attr(test, mockall::automock)]
pub trait SequencePort: Send + Sync {
    fn next_challenge_id(&self) -> ChallengeId;
    fn next_journal_entry_id(&self) -> JournalEntryId;
}
