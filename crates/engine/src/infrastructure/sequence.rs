//! Atomic identifier issuance.

use std::sync::atomic::{AtomicU64, Ordering};

use suzerain_domain::{ChallengeId, JournalEntryId};

use crate::infrastructure::ports::SequencePort;

/// Two independent counters. Each call returns the previous value plus one,
/// so ids start right after the seed and never repeat within a process.
pub struct AtomicSequence {
    challenge: AtomicU64,
    journal_entry: AtomicU64,
}

impl AtomicSequence {
    /// Resume after the last issued ids (0 for a fresh world).
    pub fn seeded(last_challenge_id: u64, last_journal_entry_id: u64) -> Self {
        Self {
            challenge: AtomicU64::new(last_challenge_id),
            journal_entry: AtomicU64::new(last_journal_entry_id),
        }
    }

    fn issue(counter: &AtomicU64) -> u64 {
        counter.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl Default for AtomicSequence {
    fn default() -> Self {
        Self::seeded(0, 0)
    }
}

impl SequencePort for AtomicSequence {
    fn next_challenge_id(&self) -> ChallengeId {
        ChallengeId::from_raw(Self::issue(&self.challenge))
    }

    fn next_journal_entry_id(&self) -> JournalEntryId {
        JournalEntryId::from_raw(Self::issue(&self.journal_entry))
    }
}
