//! Actor aggregate - a controllable persistent entity, player or not.
//!
//! Role flags (admin, monarch, herald, heir apparent) are not stored here;
//! the [`Realm`](super::Realm) resolves them from world state on demand.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::ids::{ActorId, PlaceId};
use crate::value_objects::ActorName;

/// Which of the two actor registries an actor lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    Player,
    NonPlayer,
}

/// A controllable persistent entity.
///
/// # Invariants
///
/// - `head_of_family` and `employer` are only ever set on non-player actors
/// - `titles` lists the places this actor holds title to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    id: ActorId,
    name: ActorName,
    kind: ActorKind,
    alive: bool,
    /// Absent when free
    captor: Option<ActorId>,
    location: Option<PlaceId>,
    head_of_family: Option<ActorId>,
    employer: Option<ActorId>,
    /// Family members and employees
    #[serde(default)]
    subordinates: BTreeSet<ActorId>,
    #[serde(default)]
    titles: BTreeSet<PlaceId>,
    /// Designated heir within the family
    #[serde(default)]
    heir: bool,
}

impl Actor {
    // =========================================================================
    // Constructors
    // =========================================================================

    pub fn new(id: ActorId, name: ActorName, kind: ActorKind) -> Self {
        Self {
            id,
            name,
            kind,
            alive: true,
            captor: None,
            location: None,
            head_of_family: None,
            employer: None,
            subordinates: BTreeSet::new(),
            titles: BTreeSet::new(),
            heir: false,
        }
    }

    pub fn player(id: ActorId, name: ActorName) -> Self {
        Self::new(id, name, ActorKind::Player)
    }

    pub fn non_player(id: ActorId, name: ActorName) -> Self {
        Self::new(id, name, ActorKind::NonPlayer)
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    pub fn with_location(mut self, location: PlaceId) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_captor(mut self, captor: ActorId) -> Self {
        self.captor = Some(captor);
        self
    }

    pub fn with_title(mut self, place: PlaceId) -> Self {
        self.titles.insert(place);
        self
    }

    pub fn as_heir(mut self) -> Self {
        self.heir = true;
        self
    }

    pub fn deceased(mut self) -> Self {
        self.alive = false;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> &ActorId {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &ActorName {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> ActorKind {
        self.kind
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        self.kind == ActorKind::Player
    }

    #[inline]
    pub fn is_non_player(&self) -> bool {
        self.kind == ActorKind::NonPlayer
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn captor(&self) -> Option<&ActorId> {
        self.captor.as_ref()
    }

    #[inline]
    pub fn is_captive(&self) -> bool {
        self.captor.is_some()
    }

    #[inline]
    pub fn location(&self) -> Option<&PlaceId> {
        self.location.as_ref()
    }

    pub fn is_located_in(&self, place: &PlaceId) -> bool {
        self.location.as_ref() == Some(place)
    }

    #[inline]
    pub fn head_of_family(&self) -> Option<&ActorId> {
        self.head_of_family.as_ref()
    }

    #[inline]
    pub fn employer(&self) -> Option<&ActorId> {
        self.employer.as_ref()
    }

    pub fn subordinates(&self) -> impl Iterator<Item = &ActorId> {
        self.subordinates.iter()
    }

    pub fn titles(&self) -> impl Iterator<Item = &PlaceId> {
        self.titles.iter()
    }

    pub fn holds_title(&self, place: &PlaceId) -> bool {
        self.titles.contains(place)
    }

    #[inline]
    pub fn is_heir(&self) -> bool {
        self.heir
    }

    // =========================================================================
    // Mutations (realm-controlled)
    // =========================================================================

    pub(crate) fn set_head_of_family(&mut self, head: ActorId) {
        self.head_of_family = Some(head);
    }

    pub(crate) fn set_employer(&mut self, employer: ActorId) {
        self.employer = Some(employer);
    }

    pub(crate) fn add_subordinate(&mut self, subordinate: ActorId) {
        self.subordinates.insert(subordinate);
    }

    pub(crate) fn add_title(&mut self, place: PlaceId) {
        self.titles.insert(place);
    }

    /// Returns false when the title was not recorded.
    pub(crate) fn remove_title(&mut self, place: &PlaceId) -> bool {
        self.titles.remove(place)
    }

    pub(crate) fn set_captor(&mut self, captor: Option<ActorId>) {
        self.captor = captor;
    }

    pub(crate) fn set_location(&mut self, location: PlaceId) {
        self.location = Some(location);
    }

    pub(crate) fn mark_dead(&mut self) {
        self.alive = false;
    }
}
