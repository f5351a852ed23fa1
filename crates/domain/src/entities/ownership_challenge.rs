//! Ownership challenge - a lodged, uniquely identified contest over a place's title.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aggregates::{Place, PlaceKindTag};
use crate::error::DomainError;
use crate::ids::{ActorId, ChallengeId, PlaceId};
use crate::value_objects::GameDate;

/// An ownership challenge. Immutable once lodged; its lifecycle is tracked
/// separately as a [`ChallengeStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipChallenge {
    id: ChallengeId,
    challenger: ActorId,
    target_kind: PlaceKindTag,
    target: PlaceId,
    lodged_on: GameDate,
}

impl OwnershipChallenge {
    /// Lodge a challenge by `challenger` against `place`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Constraint` when the challenger already owns the place.
    pub fn lodge(
        id: ChallengeId,
        challenger: ActorId,
        place: &Place,
        lodged_on: GameDate,
    ) -> Result<Self, DomainError> {
        if place.is_owned_by(&challenger) {
            return Err(DomainError::constraint(format!(
                "{challenger} already holds {}",
                place.id()
            )));
        }
        Ok(Self {
            id,
            challenger,
            target_kind: place.kind_tag(),
            target: place.id().clone(),
            lodged_on,
        })
    }

    #[inline]
    pub fn id(&self) -> ChallengeId {
        self.id
    }

    #[inline]
    pub fn challenger(&self) -> &ActorId {
        &self.challenger
    }

    #[inline]
    pub fn target_kind(&self) -> PlaceKindTag {
        self.target_kind
    }

    #[inline]
    pub fn target(&self) -> &PlaceId {
        &self.target
    }

    #[inline]
    pub fn lodged_on(&self) -> GameDate {
        self.lodged_on
    }
}

/// NoChallenge -> Pending -> {Transferred, Rejected}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeStatus {
    Pending,
    Transferred,
    Rejected,
}

impl ChallengeStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ChallengeStatus::Pending)
    }

    /// Validate a move to `next`. Only `Pending` may move, and only to a
    /// terminal state.
    pub fn transition(self, next: ChallengeStatus) -> Result<ChallengeStatus, DomainError> {
        match (self, next) {
            (ChallengeStatus::Pending, ChallengeStatus::Transferred)
            | (ChallengeStatus::Pending, ChallengeStatus::Rejected) => Ok(next),
            (from, to) => Err(DomainError::invalid_state_transition(format!(
                "challenge cannot move from {from} to {to}"
            ))),
        }
    }
}

impl fmt::Display for ChallengeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChallengeStatus::Pending => write!(f, "pending"),
            ChallengeStatus::Transferred => write!(f, "transferred"),
            ChallengeStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::PlaceKind;
    use crate::ids::{NationalityId, RankId};
    use crate::value_objects::{PlaceName, Rank, Season};

    fn kingdom() -> Place {
        Place::new(
            PlaceId::new("KING1").expect("id"),
            PlaceName::new("Kingdom of the Isles").expect("name"),
            PlaceKind::Kingdom {
                nationality: NationalityId::new("E").expect("id"),
            },
            Rank::new(RankId::new("1").expect("id"), "King", 6)
                .expect("rank")
                .shared(),
            ActorId::new("King_A").expect("id"),
        )
    }

    #[test]
    fn lodge_captures_target() {
        let challenge = OwnershipChallenge::lodge(
            ChallengeId::from_raw(1),
            ActorId::new("Pretender_B").expect("id"),
            &kingdom(),
            GameDate::new(1194, Season::Spring),
        )
        .expect("lodged");
        assert_eq!(challenge.target().as_str(), "KING1");
        assert_eq!(challenge.target_kind(), PlaceKindTag::Kingdom);
    }

    #[test]
    fn owner_cannot_challenge_own_place() {
        let result = OwnershipChallenge::lodge(
            ChallengeId::from_raw(1),
            ActorId::new("King_A").expect("id"),
            &kingdom(),
            GameDate::new(1194, Season::Spring),
        );
        assert!(matches!(result, Err(DomainError::Constraint(_))));
    }

    #[test]
    fn only_pending_moves() {
        assert_eq!(
            ChallengeStatus::Pending.transition(ChallengeStatus::Rejected),
            Ok(ChallengeStatus::Rejected)
        );
        assert!(ChallengeStatus::Transferred
            .transition(ChallengeStatus::Rejected)
            .is_err());
        assert!(ChallengeStatus::Pending
            .transition(ChallengeStatus::Pending)
            .is_err());
        assert!(ChallengeStatus::Rejected.is_terminal());
    }
}
