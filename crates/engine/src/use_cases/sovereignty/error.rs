//! Errors for the sovereignty use cases.
//!
//! Every error maps onto an [`ErrorKind`] so callers can tell a user-facing
//! refusal from an integrity fault without matching every variant.

use suzerain_domain::{ActorId, ChallengeId, DomainError, PlaceId};

use crate::infrastructure::ports::{JournalError, RegistryError};

/// Broad classes of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request is invalid in the current state; show it to the user.
    PreconditionViolation,
    /// Overlaps an active challenge; nothing was registered.
    ConflictViolation,
    /// Stored state contradicts an invariant; the operation was aborted.
    DataConsistencyFault,
    NotFound,
    /// A collaborator (registry, journal) failed.
    Infrastructure,
}

fn domain_kind(err: &DomainError) -> ErrorKind {
    match err {
        DomainError::NotFound { .. } => ErrorKind::NotFound,
        DomainError::DataConsistency(_) => ErrorKind::DataConsistencyFault,
        DomainError::Validation(_)
        | DomainError::InvalidId(_)
        | DomainError::Constraint(_)
        | DomainError::InvalidStateTransition(_) => ErrorKind::PreconditionViolation,
    }
}

fn registry_kind(err: &RegistryError) -> ErrorKind {
    match err {
        RegistryError::Conflict { .. } => ErrorKind::ConflictViolation,
        RegistryError::NotFound(_) => ErrorKind::NotFound,
        RegistryError::Transition { .. } => ErrorKind::PreconditionViolation,
        RegistryError::Storage { .. } => ErrorKind::Infrastructure,
    }
}

// =============================================================================
// Lodging
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ChallengeError {
    #[error("Place not found: {0}")]
    PlaceNotFound(PlaceId),
    #[error("Challenger not found: {0}")]
    ChallengerNotFound(ActorId),
    #[error("{challenger} may not lodge challenges")]
    Forbidden { challenger: ActorId },
    #[error("{challenger} already holds title to {place_id}")]
    AlreadyHoldsTitle {
        challenger: ActorId,
        place_id: PlaceId,
    },
    #[error("{0} has no owner to challenge")]
    Unowned(PlaceId),
    #[error("Challenge {existing} is already pending for {place_id}")]
    Conflict {
        place_id: PlaceId,
        existing: ChallengeId,
    },
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("Journal error: {0}")]
    Journal(#[from] JournalError),
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("Payload serialization failed: {0}")]
    Payload(#[from] serde_json::Error),
}

impl ChallengeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PlaceNotFound(_) | Self::ChallengerNotFound(_) => ErrorKind::NotFound,
            Self::Forbidden { .. } | Self::AlreadyHoldsTitle { .. } | Self::Unowned(_) => {
                ErrorKind::PreconditionViolation
            }
            Self::Conflict { .. } => ErrorKind::ConflictViolation,
            Self::Registry(e) => registry_kind(e),
            Self::Journal(_) | Self::Payload(_) => ErrorKind::Infrastructure,
            Self::Domain(e) => domain_kind(e),
        }
    }
}

// =============================================================================
// Transfer
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("Place not found: {0}")]
    PlaceNotFound(PlaceId),
    #[error("New owner not found: {0}")]
    NewOwnerNotFound(ActorId),
    #[error("Transfer of {place_id} aborted: {source}")]
    DataConsistency {
        place_id: PlaceId,
        #[source]
        source: DomainError,
    },
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl TransferError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PlaceNotFound(_) | Self::NewOwnerNotFound(_) => ErrorKind::NotFound,
            Self::DataConsistency { .. } => ErrorKind::DataConsistencyFault,
            Self::Domain(e) => domain_kind(e),
        }
    }
}

// =============================================================================
// Resolution
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Challenge not found: {0}")]
    ChallengeNotFound(ChallengeId),
    #[error("Challenge {0} is no longer pending")]
    NotPending(ChallengeId),
    #[error("Transfer failed: {0}")]
    Transfer(#[from] TransferError),
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("Journal error: {0}")]
    Journal(#[from] JournalError),
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("Payload serialization failed: {0}")]
    Payload(#[from] serde_json::Error),
}

impl ResolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ChallengeNotFound(_) => ErrorKind::NotFound,
            Self::NotPending(_) => ErrorKind::PreconditionViolation,
            Self::Transfer(e) => e.kind(),
            Self::Registry(e) => registry_kind(e),
            Self::Journal(_) | Self::Payload(_) => ErrorKind::Infrastructure,
            Self::Domain(e) => domain_kind(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_conflict_is_a_conflict() {
        let err = ChallengeError::from(RegistryError::Conflict {
            place_id: PlaceId::new("KING1").expect("id"),
            existing: ChallengeId::from_raw(1),
        });
        assert_eq!(err.kind(), ErrorKind::ConflictViolation);
    }

    #[test]
    fn consistency_fault_survives_wrapping() {
        let err = ResolveError::from(TransferError::DataConsistency {
            place_id: PlaceId::new("KING1").expect("id"),
            source: DomainError::data_consistency("title missing"),
        });
        assert_eq!(err.kind(), ErrorKind::DataConsistencyFault);
    }

    #[test]
    fn journal_failure_is_infrastructure() {
        let err = ChallengeError::from(JournalError::Unavailable("closed".into()));
        assert_eq!(err.kind(), ErrorKind::Infrastructure);
    }
}
