//! Journal entries - immutable notifications addressed to personae.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::ids::{ActorId, JournalEntryId, PlaceId};
use crate::value_objects::{GameDate, Persona};

/// Event class of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JournalEventType {
    #[serde(rename = "ownershipChallenge_new")]
    OwnershipChallengeNew,
    #[serde(rename = "ownershipChallenge_success")]
    OwnershipChallengeSuccess,
    #[serde(rename = "ownershipChallenge_failure")]
    OwnershipChallengeFailure,
}

impl JournalEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JournalEventType::OwnershipChallengeNew => "ownershipChallenge_new",
            JournalEventType::OwnershipChallengeSuccess => "ownershipChallenge_success",
            JournalEventType::OwnershipChallengeFailure => "ownershipChallenge_failure",
        }
    }
}

impl fmt::Display for JournalEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entry awaiting its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalDraft {
    date: GameDate,
    event_type: JournalEventType,
    personae: Vec<Persona>,
    payload: String,
    location: Option<PlaceId>,
}

impl JournalDraft {
    pub fn new(date: GameDate, event_type: JournalEventType) -> Self {
        Self {
            date,
            event_type,
            personae: Vec::new(),
            payload: String::new(),
            location: None,
        }
    }

    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.personae.push(persona);
        self
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = payload.into();
        self
    }

    pub fn at(mut self, location: PlaceId) -> Self {
        self.location = Some(location);
        self
    }

    /// Assign the issued id and wall-clock time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if no persona was added.
    pub fn stamp(
        self,
        id: JournalEntryId,
        recorded_at: DateTime<Utc>,
    ) -> Result<JournalEntry, DomainError> {
        if self.personae.is_empty() {
            return Err(DomainError::validation(
                "Journal entry must address at least one persona",
            ));
        }
        Ok(JournalEntry {
            id,
            date: self.date,
            event_type: self.event_type,
            personae: self.personae,
            payload: self.payload,
            location: self.location,
            recorded_at,
        })
    }
}

/// A submitted notification. Owned by the journal sink once submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    id: JournalEntryId,
    #[serde(flatten)]
    date: GameDate,
    event_type: JournalEventType,
    personae: Vec<Persona>,
    payload: String,
    location: Option<PlaceId>,
    recorded_at: DateTime<Utc>,
}

impl JournalEntry {
    #[inline]
    pub fn id(&self) -> JournalEntryId {
        self.id
    }

    #[inline]
    pub fn date(&self) -> GameDate {
        self.date
    }

    #[inline]
    pub fn event_type(&self) -> JournalEventType {
        self.event_type
    }

    pub fn personae(&self) -> &[Persona] {
        &self.personae
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn location(&self) -> Option<&PlaceId> {
        self.location.as_ref()
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// Whether this entry reaches `actor`, directly or by broadcast.
    pub fn concerns(&self, actor: &ActorId) -> bool {
        self.personae.iter().any(|p| p.addresses(actor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{RoleTag, Season};

    fn draft() -> JournalDraft {
        JournalDraft::new(
            GameDate::new(1194, Season::Summer),
            JournalEventType::OwnershipChallengeNew,
        )
    }

    #[test]
    fn stamp_requires_a_persona() {
        let err = draft()
            .stamp(JournalEntryId::from_raw(1), Utc::now())
            .expect_err("no personae");
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn personae_keep_their_order() {
        let king = ActorId::new("King_A").expect("id");
        let entry = draft()
            .with_persona(Persona::actor(king.clone(), RoleTag::King))
            .with_persona(Persona::broadcast())
            .at(PlaceId::new("KING1").expect("id"))
            .stamp(JournalEntryId::from_raw(4), Utc::now())
            .expect("entry");
        let rendered: Vec<String> = entry.personae().iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["King_A|king", "all|all"]);
        assert!(entry.concerns(&ActorId::new("Anyone").expect("id")));
        assert_eq!(entry.location().map(PlaceId::as_str), Some("KING1"));
    }

    #[test]
    fn event_type_serializes_as_tag() {
        let json = serde_json::to_string(&JournalEventType::OwnershipChallengeNew).expect("json");
        assert_eq!(json, "\"ownershipChallenge_new\"");
    }
}
