//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Has a unique identity
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//!
//! Mutations that must keep several aggregates consistent (titles, crown
//! slots, subordinate links) go through the [`Realm`].

pub mod actor;
pub mod army;
pub mod place;
pub mod realm;

pub use actor::{Actor, ActorKind};
pub use army::Army;
pub use place::{Place, PlaceKind, PlaceKindTag};
pub use realm::{CrownSlot, CrownSlots, Realm, TitleTransfer};
