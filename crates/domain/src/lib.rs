//! Suzerain domain: the authority model of a feudal realm.
//!
//! Pure types and rules with no I/O. Locking, sequencing, persistence and
//! the journal live in `suzerain-engine`.

pub mod aggregates;
pub mod authorization;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use aggregates::{
    Actor, ActorKind, Army, CrownSlot, CrownSlots, Place, PlaceKind, PlaceKindTag, Realm,
    TitleTransfer,
};
pub use authorization::{authorize, decide, Decision, Predicate, Resource, RuleSet, StandardRuleSets};
pub use entities::{ChallengeStatus, JournalDraft, JournalEntry, JournalEventType, OwnershipChallenge};
pub use error::DomainError;
pub use ids::{ActorId, ArmyId, ChallengeId, JournalEntryId, NationalityId, PlaceId, RankId};
pub use value_objects::{ActorName, GameDate, Persona, PlaceName, Rank, RoleTag, Season};
