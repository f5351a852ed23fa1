//! Journal notices about ownership challenges.

use serde::{Deserialize, Serialize};
use suzerain_domain::{
    ActorId, ChallengeId, ChallengeStatus, GameDate, JournalDraft, JournalEventType,
    OwnershipChallenge, Persona, PlaceId, PlaceKindTag, RoleTag,
};

/// Payload of every challenge journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeNotice {
    pub challenge_id: ChallengeId,
    pub place_id: PlaceId,
    pub place_name: String,
    pub target_kind: PlaceKindTag,
    pub challenger: ActorId,
    /// Owner when the challenge was lodged or resolved.
    pub incumbent: ActorId,
    pub status: ChallengeStatus,
}

impl ChallengeNotice {
    pub fn new(
        challenge: &OwnershipChallenge,
        place_name: impl Into<String>,
        incumbent: ActorId,
        status: ChallengeStatus,
    ) -> Self {
        Self {
            challenge_id: challenge.id(),
            place_id: challenge.target().clone(),
            place_name: place_name.into(),
            target_kind: challenge.target_kind(),
            challenger: challenge.challenger().clone(),
            incumbent,
            status,
        }
    }

    pub fn event_type(&self) -> JournalEventType {
        match self.status {
            ChallengeStatus::Pending => JournalEventType::OwnershipChallengeNew,
            ChallengeStatus::Transferred => JournalEventType::OwnershipChallengeSuccess,
            ChallengeStatus::Rejected => JournalEventType::OwnershipChallengeFailure,
        }
    }

    /// Draft addressed to the incumbent, the challenger and everyone, in
    /// that order, located at the disputed place.
    pub fn draft(&self, date: GameDate) -> Result<JournalDraft, serde_json::Error> {
        let payload = serde_json::to_string(self)?;
        Ok(JournalDraft::new(date, self.event_type())
            .with_persona(Persona::actor(
                self.incumbent.clone(),
                self.target_kind.incumbent_role(),
            ))
            .with_persona(Persona::actor(self.challenger.clone(), RoleTag::Pretender))
            .with_persona(Persona::broadcast())
            .with_payload(payload)
            .at(self.place_id.clone()))
    }
}
