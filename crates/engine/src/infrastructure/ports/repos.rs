//! Storage ports for sovereignty state that lives outside the realm.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use suzerain_domain::{ChallengeId, ChallengeStatus, OwnershipChallenge, PlaceId};

use super::error::RegistryError;

/// A lodged challenge and where it stands in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRecord {
    pub challenge: OwnershipChallenge,
    pub status: ChallengeStatus,
}

impl ChallengeRecord {
    pub fn pending(challenge: OwnershipChallenge) -> Self {
        Self {
            challenge,
            status: ChallengeStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == ChallengeStatus::Pending
    }
}

// =============================================================================
// Challenge Registry
// =============================================================================

/// The global collection of ownership challenges.
///
/// At most one challenge per place may be `Pending`. Implementations must
/// make the conflict check and the insertion one atomic step per place.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChallengeRegistry: Send + Sync {
    /// Register a freshly lodged challenge as `Pending`.
    ///
    /// Fails with `RegistryError::Conflict` when the target place already has
    /// a pending challenge; nothing is stored in that case.
    async fn register(&self, challenge: OwnershipChallenge) -> Result<(), RegistryError>;

    async fn get(&self, id: ChallengeId) -> Result<Option<ChallengeRecord>, RegistryError>;

    async fn pending_for_place(
        &self,
        place_id: &PlaceId,
    ) -> Result<Option<ChallengeRecord>, RegistryError>;

    /// Move a pending challenge to a terminal status, freeing its place.
    async fn resolve(
        &self,
        id: ChallengeId,
        outcome: ChallengeStatus,
    ) -> Result<ChallengeRecord, RegistryError>;

    /// Remove a still-pending challenge that was never announced, freeing
    /// its place as if it had not been registered.
    async fn withdraw(&self, id: ChallengeId) -> Result<ChallengeRecord, RegistryError>;

    async fn list_pending(&self) -> Result<Vec<ChallengeRecord>, RegistryError>;
}
