//! Error types for port operations.

use suzerain_domain::{ChallengeId, DomainError, JournalEntryId, PlaceId};

/// Challenge registry errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegistryError {
    /// Another challenge is already pending against the place.
    #[error("Challenge {existing} is already pending for {place_id}")]
    Conflict {
        place_id: PlaceId,
        existing: ChallengeId,
    },

    #[error("Challenge not found: {0}")]
    NotFound(ChallengeId),

    /// The requested status change is not allowed from the current status.
    #[error("Challenge {id}: {source}")]
    Transition {
        id: ChallengeId,
        #[source]
        source: DomainError,
    },

    /// Backing store failed - includes operation name for tracing.
    #[error("Registry error in {operation}: {message}")]
    Storage {
        operation: &'static str,
        message: String,
    },
}

impl RegistryError {
    pub fn storage(operation: &'static str, message: impl ToString) -> Self {
        Self::Storage {
            operation,
            message: message.to_string(),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Journal sink errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum JournalError {
    #[error("Journal entry {0} was already submitted")]
    DuplicateEntry(JournalEntryId),

    #[error("Journal unavailable: {0}")]
    Unavailable(String),
}
