//! In-memory challenge registry.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use suzerain_domain::{ChallengeId, ChallengeStatus, DomainError, OwnershipChallenge, PlaceId};

use crate::infrastructure::ports::{ChallengeRecord, ChallengeRegistry, RegistryError};

/// Challenges by id, plus an index of the one pending challenge per place.
///
/// `register` holds the place's index entry while it inserts the record, so
/// the conflict check and the insertion happen as one step per place.
/// `resolve` and `withdraw` never hold a record guard while touching the index.
#[derive(Default)]
pub struct InMemoryChallengeRegistry {
    records: DashMap<ChallengeId, ChallengeRecord>,
    pending: DashMap<PlaceId, ChallengeId>,
}

impl InMemoryChallengeRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChallengeRegistry for InMemoryChallengeRegistry {
    async fn register(&self, challenge: OwnershipChallenge) -> Result<(), RegistryError> {
        let id = challenge.id();
        match self.pending.entry(challenge.target().clone()) {
            Entry::Occupied(existing) => Err(RegistryError::Conflict {
                place_id: existing.key().clone(),
                existing: *existing.get(),
            }),
            Entry::Vacant(slot) => {
                if self.records.contains_key(&id) {
                    return Err(RegistryError::storage(
                        "register",
                        format!("challenge id {id} reused"),
                    ));
                }
                self.records.insert(id, ChallengeRecord::pending(challenge));
                slot.insert(id);
                Ok(())
            }
        }
    }

    async fn get(&self, id: ChallengeId) -> Result<Option<ChallengeRecord>, RegistryError> {
        Ok(self.records.get(&id).map(|r| r.value().clone()))
    }

    async fn pending_for_place(
        &self,
        place_id: &PlaceId,
    ) -> Result<Option<ChallengeRecord>, RegistryError> {
        let Some(id) = self.pending.get(place_id).map(|r| *r.value()) else {
            return Ok(None);
        };
        Ok(self
            .records
            .get(&id)
            .map(|r| r.value().clone())
            .filter(ChallengeRecord::is_pending))
    }

    async fn resolve(
        &self,
        id: ChallengeId,
        outcome: ChallengeStatus,
    ) -> Result<ChallengeRecord, RegistryError> {
        let resolved = {
            let mut record = self
                .records
                .get_mut(&id)
                .ok_or(RegistryError::NotFound(id))?;
            record.status = record
                .status
                .transition(outcome)
                .map_err(|source| RegistryError::Transition { id, source })?;
            record.value().clone()
        };
        self.pending
            .remove_if(resolved.challenge.target(), |_, pending| *pending == id);
        Ok(resolved)
    }

    async fn withdraw(&self, id: ChallengeId) -> Result<ChallengeRecord, RegistryError> {
        let (_, withdrawn) = self
            .records
            .remove_if(&id, |_, record| record.is_pending())
            .ok_or_else(|| match self.records.get(&id) {
                Some(record) => RegistryError::Transition {
                    id,
                    source: DomainError::invalid_state_transition(format!(
                        "a {} challenge cannot be withdrawn",
                        record.status
                    )),
                },
                None => RegistryError::NotFound(id),
            })?;
        self.pending
            .remove_if(withdrawn.challenge.target(), |_, pending| *pending == id);
        Ok(withdrawn)
    }

    async fn list_pending(&self) -> Result<Vec<ChallengeRecord>, RegistryError> {
        let mut pending: Vec<ChallengeRecord> = self
            .records
            .iter()
            .filter(|r| r.value().is_pending())
            .map(|r| r.value().clone())
            .collect();
        pending.sort_by_key(|r| r.challenge.id());
        Ok(pending)
    }
}
