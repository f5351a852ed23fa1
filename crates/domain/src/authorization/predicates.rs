//! Predicate library.
//!
//! Each predicate tests one capability relationship between an actor and a
//! resource. Predicates are pure: they read the realm and never consult the
//! authorization engine. An absent or mismatched resource never satisfies a
//! predicate that needs one.

use std::fmt;

use crate::aggregates::{Actor, Army, Place, Realm};

/// Anything an authorization check can target.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    Army(&'a Army),
    Place(&'a Place),
    Actor(&'a Actor),
}

impl<'a> Resource<'a> {
    pub fn as_army(self) -> Option<&'a Army> {
        match self {
            Resource::Army(army) => Some(army),
            _ => None,
        }
    }

    pub fn as_place(self) -> Option<&'a Place> {
        match self {
            Resource::Place(place) => Some(place),
            _ => None,
        }
    }

    pub fn as_fief(self) -> Option<&'a Place> {
        self.as_place().filter(|place| place.is_fief())
    }

    pub fn as_actor(self) -> Option<&'a Actor> {
        match self {
            Resource::Actor(actor) => Some(actor),
            _ => None,
        }
    }
}

impl<'a> From<&'a Army> for Resource<'a> {
    fn from(army: &'a Army) -> Self {
        Resource::Army(army)
    }
}

impl<'a> From<&'a Place> for Resource<'a> {
    fn from(place: &'a Place) -> Self {
        Resource::Place(place)
    }
}

impl<'a> From<&'a Actor> for Resource<'a> {
    fn from(actor: &'a Actor) -> Self {
        Resource::Actor(actor)
    }
}

/// A named capability test.
pub trait Predicate: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    fn evaluate(&self, realm: &Realm, actor: &Actor, resource: Option<Resource<'_>>) -> bool;
}

// =============================================================================
// Relationship checks
// =============================================================================

pub fn owns_army(actor: &Actor, army: &Army) -> bool {
    army.owner() == actor.id()
}

pub fn owns_place(actor: &Actor, place: &Place) -> bool {
    place.is_owned_by(actor.id())
}

pub fn overlord_of(realm: &Realm, actor: &Actor, place: &Place) -> bool {
    realm.overlord(place) == Some(actor.id())
}

pub fn head_of_family(realm: &Realm, actor: &Actor, character: &Actor) -> bool {
    realm.head_of_family(character) == Some(actor.id())
}

/// The character is the actor, or a non-player in the actor's family or pay.
pub fn owns_character(realm: &Realm, actor: &Actor, character: &Actor) -> bool {
    if character.id() == actor.id() {
        return true;
    }
    character.is_non_player()
        && (head_of_family(realm, actor, character) || character.employer() == Some(actor.id()))
}

pub fn owns_character_not_captured(realm: &Realm, actor: &Actor, character: &Actor) -> bool {
    owns_character(realm, actor, character) && !character.is_captive()
}

/// Owner, free presence, or the free presence of any subordinate.
///
/// A captive never lends visibility, the actor itself included.
pub fn can_see_place(realm: &Realm, actor: &Actor, place: &Place) -> bool {
    if owns_place(actor, place) {
        return true;
    }
    if actor.is_located_in(place.id()) && !actor.is_captive() {
        return true;
    }
    realm
        .subordinates_of(actor)
        .any(|sub| sub.is_located_in(place.id()) && !sub.is_captive())
}

/// Owner, or fief visibility of the army's location. An army standing in a
/// province or kingdom is seen by its owner only.
pub fn can_see_army(realm: &Realm, actor: &Actor, army: &Army) -> bool {
    owns_army(actor, army)
        || realm
            .place(army.location())
            .filter(|place| place.is_fief())
            .is_some_and(|fief| can_see_place(realm, actor, fief))
}

// =============================================================================
// Named predicates
// =============================================================================

macro_rules! predicate {
    ($(#[$meta:meta])* $name:ident, $label:literal, |$realm:ident, $actor:ident, $resource:ident| $body:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Predicate for $name {
            fn name(&self) -> &'static str {
                $label
            }

            #[allow(unused_variables)]
            fn evaluate(
                &self,
                $realm: &Realm,
                $actor: &Actor,
                $resource: Option<Resource<'_>>,
            ) -> bool {
                $body
            }
        }
    };
}

predicate!(OwnsArmy, "owns_army", |realm, actor, resource| resource
    .and_then(Resource::as_army)
    .is_some_and(|army| owns_army(actor, army)));

predicate!(OwnsFief, "owns_fief", |realm, actor, resource| resource
    .and_then(Resource::as_fief)
    .is_some_and(|fief| owns_place(actor, fief)));

predicate!(
    /// Any kind of place: kingdom, province or fief.
    OwnsPlace,
    "owns_place",
    |realm, actor, resource| resource
        .and_then(Resource::as_place)
        .is_some_and(|place| owns_place(actor, place))
);

predicate!(OverlordOfFief, "overlord_of_fief", |realm, actor, resource| resource
    .and_then(Resource::as_fief)
    .is_some_and(|fief| overlord_of(realm, actor, fief)));

predicate!(HeadOfFamily, "head_of_family", |realm, actor, resource| resource
    .and_then(Resource::as_actor)
    .is_some_and(|character| head_of_family(realm, actor, character)));

predicate!(OwnsCharacter, "owns_character", |realm, actor, resource| resource
    .and_then(Resource::as_actor)
    .is_some_and(|character| owns_character(realm, actor, character)));

predicate!(
    OwnsCharacterNotCaptured,
    "owns_character_not_captured",
    |realm, actor, resource| resource
        .and_then(Resource::as_actor)
        .is_some_and(|character| owns_character_not_captured(realm, actor, character))
);

predicate!(CanSeeFief, "can_see_fief", |realm, actor, resource| resource
    .and_then(Resource::as_fief)
    .is_some_and(|fief| can_see_place(realm, actor, fief)));

predicate!(CanSeeArmy, "can_see_army", |realm, actor, resource| resource
    .and_then(Resource::as_army)
    .is_some_and(|army| can_see_army(realm, actor, army)));

// Single-actor checks: the resource is ignored.

predicate!(IsAdmin, "is_admin", |realm, actor, resource| realm
    .is_admin(actor.id()));

predicate!(IsMonarch, "is_monarch", |realm, actor, resource| realm
    .is_monarch(actor.id()));

predicate!(IsHerald, "is_herald", |realm, actor, resource| realm
    .is_herald(actor.id()));

predicate!(IsHeirApparent, "is_heir_apparent", |realm, actor, resource| realm
    .is_heir_apparent(actor));

predicate!(IsAlive, "is_alive", |realm, actor, resource| actor.is_alive());
