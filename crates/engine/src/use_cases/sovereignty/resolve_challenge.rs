//! Resolve ownership challenge use case.
//!
//! Pending -> Transferred (title moves to the challenger) or
//! Pending -> Rejected. How the verdict is reached (battle, siege, decree)
//! is decided elsewhere.

use std::sync::Arc;

use suzerain_domain::{ChallengeId, ChallengeStatus, Realm};
use tokio::sync::{Mutex, RwLock};

use crate::infrastructure::ports::{
    ChallengeRecord, ChallengeRegistry, ClockPort, JournalSink, SequencePort, WorldClockPort,
};

use super::error::ResolveError;
use super::notice::ChallengeNotice;
use super::transfer_ownership::TransferOwnership;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The challenger takes the title.
    Upheld,
    Dismissed,
}

impl Verdict {
    fn outcome(self) -> ChallengeStatus {
        match self {
            Verdict::Upheld => ChallengeStatus::Transferred,
            Verdict::Dismissed => ChallengeStatus::Rejected,
        }
    }
}

pub struct ResolveChallenge {
    realm: Arc<RwLock<Realm>>,
    registry: Arc<dyn ChallengeRegistry>,
    transfer: Arc<TransferOwnership>,
    journal: Arc<dyn JournalSink>,
    sequence: Arc<dyn SequencePort>,
    world_clock: Arc<dyn WorldClockPort>,
    clock: Arc<dyn ClockPort>,
    /// One resolution at a time, so a challenge can't be upheld twice.
    resolving: Mutex<()>,
}

impl ResolveChallenge {
    pub fn new(
        realm: Arc<RwLock<Realm>>,
        registry: Arc<dyn ChallengeRegistry>,
        transfer: Arc<TransferOwnership>,
        journal: Arc<dyn JournalSink>,
        sequence: Arc<dyn SequencePort>,
        world_clock: Arc<dyn WorldClockPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            realm,
            registry,
            transfer,
            journal,
            sequence,
            world_clock,
            clock,
            resolving: Mutex::new(()),
        }
    }

    pub async fn execute(
        &self,
        challenge_id: ChallengeId,
        verdict: Verdict,
    ) -> Result<ChallengeRecord, ResolveError> {
        let _resolving = self.resolving.lock().await;

        let record = self
            .registry
            .get(challenge_id)
            .await?
            .ok_or(ResolveError::ChallengeNotFound(challenge_id))?;
        if !record.is_pending() {
            return Err(ResolveError::NotPending(challenge_id));
        }
        let challenge = &record.challenge;

        let (incumbent, place_name) = {
            let realm = self.realm.read().await;
            let place = realm.place(challenge.target());
            (
                place.and_then(|p| p.owner()).cloned(),
                place.map(|p| p.name().to_string()).unwrap_or_default(),
            )
        };

        if verdict == Verdict::Upheld {
            self.transfer
                .execute(challenge.target(), challenge.challenger())
                .await?;
        }
        let resolved = self.registry.resolve(challenge_id, verdict.outcome()).await?;

        // The incumbent is only absent for places that lost their owner
        // record; fall back to the challenger so the entry stays addressable.
        let incumbent = incumbent.unwrap_or_else(|| challenge.challenger().clone());
        let notice = ChallengeNotice::new(challenge, place_name, incumbent, resolved.status);
        let entry = notice
            .draft(self.world_clock.current_date())?
            .stamp(self.sequence.next_journal_entry_id(), self.clock.now())?;
        self.journal.submit(entry).await?;

        tracing::info!(
            challenge_id = %challenge_id,
            place_id = %challenge.target(),
            challenger_id = %challenge.challenger(),
            status = %resolved.status,
            "Ownership challenge resolved"
        );
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use suzerain_domain::{GameDate, JournalEventType, Season, StandardRuleSets};

    use super::*;
    use crate::infrastructure::challenge_registry::InMemoryChallengeRegistry;
    use crate::infrastructure::clock::{FixedClock, SeasonalClock};
    use crate::infrastructure::journal::InMemoryJournal;
    use crate::infrastructure::sequence::AtomicSequence;
    use crate::test_fixtures::{self, ids};
    use crate::use_cases::sovereignty::{ErrorKind, LodgeChallenge};

    struct Harness {
        realm: Arc<RwLock<Realm>>,
        journal: Arc<InMemoryJournal>,
        lodge: LodgeChallenge,
        resolve: ResolveChallenge,
    }

    fn harness() -> Harness {
        let realm = Arc::new(RwLock::new(test_fixtures::canonical_realm()));
        let registry: Arc<dyn ChallengeRegistry> = Arc::new(InMemoryChallengeRegistry::new());
        let journal = Arc::new(InMemoryJournal::default());
        let sequence: Arc<dyn SequencePort> = Arc::new(AtomicSequence::default());
        let world_clock: Arc<dyn WorldClockPort> =
            Arc::new(SeasonalClock::starting_at(GameDate::new(1194, Season::Spring)));
        let clock: Arc<dyn ClockPort> = Arc::new(FixedClock(Utc::now()));

        let lodge = LodgeChallenge::new(
            realm.clone(),
            StandardRuleSets::new().lodge_challenge,
            registry.clone(),
            journal.clone(),
            sequence.clone(),
            world_clock.clone(),
            clock.clone(),
        );
        let resolve = ResolveChallenge::new(
            realm.clone(),
            registry,
            Arc::new(TransferOwnership::new(realm.clone())),
            journal.clone(),
            sequence,
            world_clock,
            clock,
        );
        Harness {
            realm,
            journal,
            lodge,
            resolve,
        }
    }

    #[tokio::test]
    async fn upheld_challenge_transfers_title() {
        let h = harness();
        let lodged = h
            .lodge
            .execute(&ids::place("ESX02"), &ids::actor("Pretender_B"))
            .await
            .expect("lodged");

        let record = h
            .resolve
            .execute(lodged.challenge.id(), Verdict::Upheld)
            .await
            .expect("resolved");
        assert_eq!(record.status, ChallengeStatus::Transferred);

        let realm = h.realm.read().await;
        let fief = realm.place(&ids::place("ESX02")).expect("fief");
        assert!(fief.is_owned_by(&ids::actor("Pretender_B")));

        let entries = h.journal.all().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[1].event_type(),
            JournalEventType::OwnershipChallengeSuccess
        );
        let personae: Vec<String> = entries[1].personae().iter().map(ToString::to_string).collect();
        assert_eq!(
            personae,
            vec!["Baron_C|fiefOwner", "Pretender_B|pretender", "all|all"]
        );
    }

    #[tokio::test]
    async fn dismissed_challenge_leaves_title_and_frees_place() {
        let h = harness();
        let lodged = h
            .lodge
            .execute(&ids::place("KING1"), &ids::actor("Pretender_B"))
            .await
            .expect("lodged");

        let record = h
            .resolve
            .execute(lodged.challenge.id(), Verdict::Dismissed)
            .await
            .expect("resolved");
        assert_eq!(record.status, ChallengeStatus::Rejected);
        assert!(h
            .realm
            .read()
            .await
            .place(&ids::place("KING1"))
            .expect("kingdom")
            .is_owned_by(&ids::actor("King_A")));
        assert_eq!(
            h.journal.all().await[1].event_type(),
            JournalEventType::OwnershipChallengeFailure
        );

        h.lodge
            .execute(&ids::place("KING1"), &ids::actor("Pretender_B"))
            .await
            .expect("place is open to a new challenge");
    }

    #[tokio::test]
    async fn second_resolution_is_rejected() {
        let h = harness();
        let lodged = h
            .lodge
            .execute(&ids::place("ESX01"), &ids::actor("Baron_C"))
            .await
            .expect("lodged");
        h.resolve
            .execute(lodged.challenge.id(), Verdict::Upheld)
            .await
            .expect("resolved");

        let err = h
            .resolve
            .execute(lodged.challenge.id(), Verdict::Upheld)
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::NotPending(_)));
        assert_eq!(err.kind(), ErrorKind::PreconditionViolation);

        let err = h
            .resolve
            .execute(ChallengeId::from_raw(404), Verdict::Dismissed)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
