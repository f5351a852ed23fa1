//! Application state and composition.

use std::sync::Arc;

use suzerain_domain::{Realm, StandardRuleSets};
use tokio::sync::RwLock;

use crate::infrastructure::{
    challenge_registry::InMemoryChallengeRegistry,
    clock::{SeasonalClock, SystemClock},
    journal::InMemoryJournal,
    ports::{ChallengeRegistry, ClockPort, JournalSink, SequencePort, WorldClockPort},
    sequence::AtomicSequence,
    settings::AuthoritySettings,
};
use crate::use_cases::{self, sovereignty};

/// Main application state.
///
/// Owns the world-state context and wires every use case to it.
pub struct App {
    pub realm: Arc<RwLock<Realm>>,
    pub rule_sets: Arc<StandardRuleSets>,
    pub registry: Arc<dyn ChallengeRegistry>,
    pub journal: Arc<InMemoryJournal>,
    pub world_clock: Arc<dyn WorldClockPort>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub authorize: Arc<use_cases::Authorize>,
    pub sovereignty: use_cases::SovereigntyUseCases,
}

impl App {
    /// Create a new App over `realm` with in-memory adapters.
    pub fn new(realm: Realm, settings: &AuthoritySettings) -> Self {
        let realm = Arc::new(RwLock::new(realm));
        let rule_sets = Arc::new(StandardRuleSets::new());

        let clock_port: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
        let world_clock: Arc<dyn WorldClockPort> =
            Arc::new(SeasonalClock::starting_at(settings.start_date));
        let sequence: Arc<dyn SequencePort> = Arc::new(AtomicSequence::seeded(
            settings.challenge_id_seed,
            settings.journal_id_seed,
        ));
        let registry: Arc<dyn ChallengeRegistry> = Arc::new(InMemoryChallengeRegistry::new());
        let journal = Arc::new(InMemoryJournal::new(settings.journal_broadcast_capacity));
        let journal_sink: Arc<dyn JournalSink> = journal.clone();

        let authorize = Arc::new(use_cases::Authorize::new(realm.clone()));
        let transfer = Arc::new(sovereignty::TransferOwnership::new(realm.clone()));
        let lodge = Arc::new(sovereignty::LodgeChallenge::new(
            realm.clone(),
            rule_sets.lodge_challenge.clone(),
            registry.clone(),
            journal_sink.clone(),
            sequence.clone(),
            world_clock.clone(),
            clock_port.clone(),
        ));
        let resolve = Arc::new(sovereignty::ResolveChallenge::new(
            realm.clone(),
            registry.clone(),
            transfer.clone(),
            journal_sink,
            sequence,
            world_clock.clone(),
            clock_port,
        ));

        Self {
            realm,
            rule_sets,
            registry,
            journal,
            world_clock,
            use_cases: UseCases {
                authorize,
                sovereignty: use_cases::SovereigntyUseCases::new(lodge, transfer, resolve),
            },
        }
    }
}
