//! Realm - the world-state context every authority operation reads or mutates.
//!
//! Holds the two actor registries (player and non-player), the sovereign
//! places, armies, the rank table, the crown slots and the role rosters.
//! The realm is a plain value; callers own the locking discipline around it.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{ActorId, ArmyId, PlaceId, RankId};
use crate::value_objects::Rank;

use super::actor::{Actor, ActorKind};
use super::army::Army;
use super::place::{Place, PlaceKind};

// =============================================================================
// Crown slots
// =============================================================================

/// One of the two process-wide monarch pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrownSlot {
    First,
    Second,
}

/// At most two simultaneous monarchs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrownSlots {
    first: Option<ActorId>,
    second: Option<ActorId>,
}

impl CrownSlots {
    pub fn get(&self, slot: CrownSlot) -> Option<&ActorId> {
        match slot {
            CrownSlot::First => self.first.as_ref(),
            CrownSlot::Second => self.second.as_ref(),
        }
    }

    pub fn occupies(&self, actor: &ActorId) -> bool {
        self.first.as_ref() == Some(actor) || self.second.as_ref() == Some(actor)
    }

    fn set(&mut self, slot: CrownSlot, actor: ActorId) {
        match slot {
            CrownSlot::First => self.first = Some(actor),
            CrownSlot::Second => self.second = Some(actor),
        }
    }

    /// Hand every slot `from` occupies to `to`.
    fn pass(&mut self, from: &ActorId, to: &ActorId) -> Vec<CrownSlot> {
        let mut passed = Vec::new();
        for slot in [CrownSlot::First, CrownSlot::Second] {
            if self.get(slot) == Some(from) {
                self.set(slot, to.clone());
                passed.push(slot);
            }
        }
        passed
    }
}

// =============================================================================
// Title transfer outcome
// =============================================================================

/// What a successful title transfer changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleTransfer {
    pub place_id: PlaceId,
    pub previous_owner: Option<ActorId>,
    pub previous_title_holder: Option<ActorId>,
    pub new_owner: ActorId,
    pub crown_slots_passed: Vec<CrownSlot>,
}

// =============================================================================
// Realm
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct Realm {
    players: HashMap<ActorId, Actor>,
    non_players: HashMap<ActorId, Actor>,
    places: HashMap<PlaceId, Place>,
    armies: HashMap<ArmyId, Army>,
    ranks: HashMap<RankId, Arc<Rank>>,
    crown: CrownSlots,
    admins: BTreeSet<ActorId>,
    heralds: BTreeSet<ActorId>,
}

impl Realm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Realm whose admin roster is `admins`.
    pub fn with_admins(admins: impl IntoIterator<Item = ActorId>) -> Self {
        Self {
            admins: admins.into_iter().collect(),
            ..Self::default()
        }
    }

    // =========================================================================
    // Ranks
    // =========================================================================

    /// Register a rank and return the shared descriptor.
    pub fn add_rank(&mut self, rank: Rank) -> Result<Arc<Rank>, DomainError> {
        if self.ranks.contains_key(rank.id()) {
            return Err(DomainError::constraint(format!(
                "Rank {} already registered",
                rank.id()
            )));
        }
        let shared = rank.shared();
        self.ranks.insert(shared.id().clone(), Arc::clone(&shared));
        Ok(shared)
    }

    pub fn rank(&self, id: &RankId) -> Option<&Arc<Rank>> {
        self.ranks.get(id)
    }

    // =========================================================================
    // Actors
    // =========================================================================

    /// Register an actor in the registry matching its kind.
    ///
    /// An id may live in exactly one of the two registries.
    pub fn add_actor(&mut self, actor: Actor) -> Result<(), DomainError> {
        if self.actor(actor.id()).is_some() {
            return Err(DomainError::constraint(format!(
                "Actor {} already registered",
                actor.id()
            )));
        }
        let registry = match actor.kind() {
            ActorKind::Player => &mut self.players,
            ActorKind::NonPlayer => &mut self.non_players,
        };
        registry.insert(actor.id().clone(), actor);
        Ok(())
    }

    /// Look an actor up in the player registry, then the non-player one.
    pub fn actor(&self, id: &ActorId) -> Option<&Actor> {
        self.players.get(id).or_else(|| self.non_players.get(id))
    }

    fn actor_mut(&mut self, id: &ActorId) -> Option<&mut Actor> {
        match self.players.get_mut(id) {
            Some(actor) => Some(actor),
            None => self.non_players.get_mut(id),
        }
    }

    fn require_actor_mut(&mut self, id: &ActorId) -> Result<&mut Actor, DomainError> {
        self.actor_mut(id)
            .ok_or_else(|| DomainError::not_found("Actor", id.as_str()))
    }

    pub fn players(&self) -> impl Iterator<Item = &Actor> {
        self.players.values()
    }

    pub fn non_players(&self) -> impl Iterator<Item = &Actor> {
        self.non_players.values()
    }

    /// Make `npc` an employee of `employer`.
    pub fn employ(&mut self, employer: &ActorId, npc: &ActorId) -> Result<(), DomainError> {
        self.attach_subordinate(employer, npc, Actor::set_employer)
    }

    /// Make `npc` a family member headed by `head`.
    pub fn adopt(&mut self, head: &ActorId, npc: &ActorId) -> Result<(), DomainError> {
        self.attach_subordinate(head, npc, Actor::set_head_of_family)
    }

    fn attach_subordinate(
        &mut self,
        patron: &ActorId,
        npc: &ActorId,
        link: fn(&mut Actor, ActorId),
    ) -> Result<(), DomainError> {
        if patron == npc {
            return Err(DomainError::constraint(format!(
                "Actor {patron} cannot be its own subordinate"
            )));
        }
        if self.actor(patron).is_none() {
            return Err(DomainError::not_found("Actor", patron.as_str()));
        }
        let subordinate = self
            .non_players
            .get_mut(npc)
            .ok_or_else(|| DomainError::not_found("Non-player actor", npc.as_str()))?;
        link(subordinate, patron.clone());
        self.require_actor_mut(patron)?.add_subordinate(npc.clone());
        Ok(())
    }

    pub fn relocate(&mut self, actor: &ActorId, place: &PlaceId) -> Result<(), DomainError> {
        if !self.places.contains_key(place) {
            return Err(DomainError::not_found("Place", place.as_str()));
        }
        self.require_actor_mut(actor)?.set_location(place.clone());
        Ok(())
    }

    pub fn capture(&mut self, captive: &ActorId, captor: &ActorId) -> Result<(), DomainError> {
        if self.actor(captor).is_none() {
            return Err(DomainError::not_found("Actor", captor.as_str()));
        }
        self.require_actor_mut(captive)?
            .set_captor(Some(captor.clone()));
        Ok(())
    }

    pub fn release(&mut self, captive: &ActorId) -> Result<(), DomainError> {
        self.require_actor_mut(captive)?.set_captor(None);
        Ok(())
    }

    pub fn record_death(&mut self, actor: &ActorId) -> Result<(), DomainError> {
        self.require_actor_mut(actor)?.mark_dead();
        Ok(())
    }

    // =========================================================================
    // Roles (resolved from state)
    // =========================================================================

    pub fn is_admin(&self, actor: &ActorId) -> bool {
        self.admins.contains(actor)
    }

    pub fn is_monarch(&self, actor: &ActorId) -> bool {
        self.crown.occupies(actor)
    }

    pub fn is_herald(&self, actor: &ActorId) -> bool {
        self.heralds.contains(actor)
    }

    /// A flagged heir whose head of family currently wears a crown.
    pub fn is_heir_apparent(&self, actor: &Actor) -> bool {
        actor.is_heir()
            && self
                .head_of_family(actor)
                .is_some_and(|head| head != actor.id() && self.is_monarch(head))
    }

    /// Only a monarch may appoint heralds.
    pub fn appoint_herald(
        &mut self,
        monarch: &ActorId,
        herald: &ActorId,
    ) -> Result<(), DomainError> {
        if !self.is_monarch(monarch) {
            return Err(DomainError::constraint(format!(
                "{monarch} is not a monarch and cannot appoint heralds"
            )));
        }
        if self.actor(herald).is_none() {
            return Err(DomainError::not_found("Actor", herald.as_str()));
        }
        self.heralds.insert(herald.clone());
        Ok(())
    }

    pub fn crown_slots(&self) -> &CrownSlots {
        &self.crown
    }

    /// Seat `actor` in a crown slot.
    pub fn crown(&mut self, slot: CrownSlot, actor: &ActorId) -> Result<(), DomainError> {
        if self.actor(actor).is_none() {
            return Err(DomainError::not_found("Actor", actor.as_str()));
        }
        self.crown.set(slot, actor.clone());
        Ok(())
    }

    /// A player heads their own family; a non-player follows its pointer.
    pub fn head_of_family<'a>(&'a self, actor: &'a Actor) -> Option<&'a ActorId> {
        match actor.kind() {
            ActorKind::Player => Some(actor.id()),
            ActorKind::NonPlayer => actor.head_of_family(),
        }
    }

    /// Subordinates of `actor` that resolve to registered actors.
    pub fn subordinates_of<'a>(&'a self, actor: &'a Actor) -> impl Iterator<Item = &'a Actor> {
        actor.subordinates().filter_map(|id| self.actor(id))
    }

    // =========================================================================
    // Places
    // =========================================================================

    /// Register a place, checking its invariants.
    ///
    /// Parents must be registered first (kingdoms, then provinces, then
    /// fiefs). The place's rank is re-linked to the realm's shared descriptor.
    pub fn add_place(&mut self, mut place: Place) -> Result<(), DomainError> {
        if self.places.contains_key(place.id()) {
            return Err(DomainError::constraint(format!(
                "Place {} already registered",
                place.id()
            )));
        }
        let rank = self
            .ranks
            .get(place.rank().id())
            .cloned()
            .ok_or_else(|| DomainError::not_found("Rank", place.rank().id().as_str()))?;
        place.relink_rank(rank);

        let owner = place
            .owner()
            .ok_or_else(|| DomainError::validation(format!("Place {} has no owner", place.id())))?;
        if self.actor(owner).is_none() {
            return Err(DomainError::not_found("Actor", owner.as_str()));
        }
        if let Some(holder) = place.title_holder() {
            if self.actor(holder).is_none() {
                return Err(DomainError::not_found("Actor", holder.as_str()));
            }
        }

        match place.kind() {
            PlaceKind::Kingdom { .. } => {}
            PlaceKind::Province { kingdom } => {
                self.require_parent(place.id(), kingdom, Place::is_kingdom, "kingdom")?
            }
            PlaceKind::Fief { province } => self.require_parent(
                place.id(),
                province,
                |p| matches!(p.kind(), PlaceKind::Province { .. }),
                "province",
            )?,
        }

        self.places.insert(place.id().clone(), place);
        Ok(())
    }

    fn require_parent(
        &self,
        child: &PlaceId,
        parent: &PlaceId,
        is_expected_kind: fn(&Place) -> bool,
        expected: &str,
    ) -> Result<(), DomainError> {
        match self.places.get(parent) {
            Some(p) if is_expected_kind(p) => Ok(()),
            Some(_) => Err(DomainError::validation(format!(
                "Parent {parent} of {child} is not a {expected}"
            ))),
            None => Err(DomainError::not_found("Place", parent.as_str())),
        }
    }

    pub fn place(&self, id: &PlaceId) -> Option<&Place> {
        self.places.get(id)
    }

    pub fn places(&self) -> impl Iterator<Item = &Place> {
        self.places.values()
    }

    /// Resolve a place's title holder against both registries.
    ///
    /// A lookup only: `None` when unset or unresolvable.
    pub fn title_holder(&self, place: &Place) -> Option<&Actor> {
        place.title_holder().and_then(|id| self.actor(id))
    }

    /// Fief -> owner of its province; province -> owner of its kingdom.
    /// Kingdoms have no overlord.
    pub fn overlord(&self, place: &Place) -> Option<&ActorId> {
        place
            .kind()
            .parent()
            .and_then(|parent| self.places.get(parent))
            .and_then(Place::owner)
    }

    // =========================================================================
    // Armies
    // =========================================================================

    pub fn add_army(&mut self, army: Army) -> Result<(), DomainError> {
        if self.armies.contains_key(army.id()) {
            return Err(DomainError::constraint(format!(
                "Army {} already registered",
                army.id()
            )));
        }
        if self.actor(army.owner()).is_none() {
            return Err(DomainError::not_found("Actor", army.owner().as_str()));
        }
        if !self.places.contains_key(army.location()) {
            return Err(DomainError::not_found("Place", army.location().as_str()));
        }
        self.armies.insert(army.id().clone(), army);
        Ok(())
    }

    pub fn army(&self, id: &ArmyId) -> Option<&Army> {
        self.armies.get(id)
    }

    pub fn march_army(&mut self, army: &ArmyId, destination: &PlaceId) -> Result<(), DomainError> {
        if !self.places.contains_key(destination) {
            return Err(DomainError::not_found("Place", destination.as_str()));
        }
        self.armies
            .get_mut(army)
            .ok_or_else(|| DomainError::not_found("Army", army.as_str()))?
            .set_location(destination.clone());
        Ok(())
    }

    // =========================================================================
    // Title transfer
    // =========================================================================

    /// Move title, ownership and any crown slot of `place_id` to `new_owner`.
    ///
    /// Every check runs before the first mutation, so an `Err` leaves the
    /// realm untouched. A title holder that is set but unresolvable, or that
    /// does not record the title, is a `DataConsistency` fault.
    pub fn transfer_title(
        &mut self,
        place_id: &PlaceId,
        new_owner: &ActorId,
    ) -> Result<TitleTransfer, DomainError> {
        let place = self
            .places
            .get(place_id)
            .ok_or_else(|| DomainError::not_found("Place", place_id.as_str()))?;
        if self.actor(new_owner).is_none() {
            return Err(DomainError::not_found("Actor", new_owner.as_str()));
        }

        let previous_owner = place.owner().cloned();
        let previous_title_holder = place.title_holder().cloned();
        let is_kingdom = place.is_kingdom();

        if let Some(holder_id) = &previous_title_holder {
            let holder = self.actor(holder_id).ok_or_else(|| {
                DomainError::data_consistency(format!(
                    "title holder {holder_id} of {place_id} is not a registered actor"
                ))
            })?;
            if !holder.holds_title(place_id) {
                return Err(DomainError::data_consistency(format!(
                    "title {place_id} is missing from the title set of its holder {holder_id}"
                )));
            }
        }

        if let Some(holder_id) = &previous_title_holder {
            if let Some(holder) = self.actor_mut(holder_id) {
                holder.remove_title(place_id);
            }
        }
        self.require_actor_mut(new_owner)?
            .add_title(place_id.clone());

        let crown_slots_passed = match (&previous_owner, is_kingdom) {
            (Some(previous), true) => self.crown.pass(previous, new_owner),
            _ => Vec::new(),
        };

        if let Some(place) = self.places.get_mut(place_id) {
            place.set_title_holder(new_owner.clone());
            place.set_owner(new_owner.clone());
        }

        Ok(TitleTransfer {
            place_id: place_id.clone(),
            previous_owner,
            previous_title_holder,
            new_owner: new_owner.clone(),
            crown_slots_passed,
        })
    }
}
