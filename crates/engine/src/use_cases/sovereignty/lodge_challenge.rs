//! Lodge ownership challenge use case.
//!
//! NoChallenge -> Pending. The journal announcement is only submitted once
//! the registry has accepted the challenge; a challenge whose announcement
//! fails is withdrawn again.

use std::sync::Arc;

use suzerain_domain::{
    authorize, ActorId, ChallengeStatus, GameDate, JournalEntryId, OwnershipChallenge, PlaceId,
    Realm, RuleSet,
};
use tokio::sync::RwLock;

use crate::infrastructure::ports::{
    ChallengeRegistry, ClockPort, JournalSink, RegistryError, SequencePort, WorldClockPort,
};

use super::error::ChallengeError;
use super::notice::ChallengeNotice;

/// A registered challenge and the id of its announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LodgedChallenge {
    pub challenge: OwnershipChallenge,
    pub journal_entry_id: JournalEntryId,
}

pub struct LodgeChallenge {
    realm: Arc<RwLock<Realm>>,
    rule_set: RuleSet,
    registry: Arc<dyn ChallengeRegistry>,
    journal: Arc<dyn JournalSink>,
    sequence: Arc<dyn SequencePort>,
    world_clock: Arc<dyn WorldClockPort>,
    clock: Arc<dyn ClockPort>,
}

impl LodgeChallenge {
    pub fn new(
        realm: Arc<RwLock<Realm>>,
        rule_set: RuleSet,
        registry: Arc<dyn ChallengeRegistry>,
        journal: Arc<dyn JournalSink>,
        sequence: Arc<dyn SequencePort>,
        world_clock: Arc<dyn WorldClockPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            realm,
            rule_set,
            registry,
            journal,
            sequence,
            world_clock,
            clock,
        }
    }

    /// Lodge a challenge by `challenger_id` against `place_id`.
    ///
    /// # Returns
    /// * `Ok(LodgedChallenge)` - registered as pending and announced
    /// * `Err(ChallengeError)` - nothing registered, nothing announced
    pub async fn execute(
        &self,
        place_id: &PlaceId,
        challenger_id: &ActorId,
    ) -> Result<LodgedChallenge, ChallengeError> {
        let date = self.world_clock.current_date();

        // Transfers wait while the check and the registration happen.
        let (challenge, notice) = {
            let realm = self.realm.read().await;
            let place = realm
                .place(place_id)
                .ok_or_else(|| ChallengeError::PlaceNotFound(place_id.clone()))?;
            let challenger = realm
                .actor(challenger_id)
                .ok_or_else(|| ChallengeError::ChallengerNotFound(challenger_id.clone()))?;

            if !authorize(&self.rule_set, &realm, challenger, Some(place.into())) {
                tracing::warn!(
                    challenger_id = %challenger_id,
                    place_id = %place_id,
                    rule_set = self.rule_set.name(),
                    "Challenge rejected: challenger not authorized"
                );
                return Err(ChallengeError::Forbidden {
                    challenger: challenger_id.clone(),
                });
            }

            let incumbent = place
                .owner()
                .cloned()
                .ok_or_else(|| ChallengeError::Unowned(place_id.clone()))?;
            if &incumbent == challenger_id {
                tracing::warn!(
                    challenger_id = %challenger_id,
                    place_id = %place_id,
                    "Challenge rejected: challenger already holds title"
                );
                return Err(ChallengeError::AlreadyHoldsTitle {
                    challenger: challenger_id.clone(),
                    place_id: place_id.clone(),
                });
            }

            let challenge = OwnershipChallenge::lodge(
                self.sequence.next_challenge_id(),
                challenger_id.clone(),
                place,
                date,
            )?;

            if let Err(e) = self.registry.register(challenge.clone()).await {
                return Err(match e {
                    RegistryError::Conflict { place_id, existing } => {
                        tracing::warn!(
                            challenger_id = %challenger_id,
                            place_id = %place_id,
                            existing_challenge_id = %existing,
                            "Challenge rejected: another challenge is pending"
                        );
                        ChallengeError::Conflict { place_id, existing }
                    }
                    other => other.into(),
                });
            }

            let notice = ChallengeNotice::new(
                &challenge,
                place.name().as_str(),
                incumbent,
                ChallengeStatus::Pending,
            );
            (challenge, notice)
        };

        let journal_entry_id = match self.announce(&notice, date).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(
                    challenge_id = %challenge.id(),
                    place_id = %place_id,
                    error = %e,
                    "Challenge announcement failed, withdrawing registration"
                );
                if let Err(withdraw_err) = self.registry.withdraw(challenge.id()).await {
                    tracing::error!(
                        challenge_id = %challenge.id(),
                        place_id = %place_id,
                        error = %withdraw_err,
                        "Unannounced challenge could not be withdrawn"
                    );
                }
                return Err(e);
            }
        };

        tracing::info!(
            challenge_id = %challenge.id(),
            place_id = %place_id,
            challenger_id = %challenger_id,
            incumbent_id = %notice.incumbent,
            journal_entry_id = %journal_entry_id,
            "Ownership challenge lodged"
        );

        Ok(LodgedChallenge {
            challenge,
            journal_entry_id,
        })
    }

    async fn announce(
        &self,
        notice: &ChallengeNotice,
        date: GameDate,
    ) -> Result<JournalEntryId, ChallengeError> {
        let entry = notice
            .draft(date)?
            .stamp(self.sequence.next_journal_entry_id(), self.clock.now())?;
        let journal_entry_id = entry.id();
        self.journal.submit(entry).await?;
        Ok(journal_entry_id)
    }
}
