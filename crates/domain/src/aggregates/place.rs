//! Place aggregate - a sovereign kingdom, province or fief.
//!
//! # Owner vs title holder
//!
//! `owner` is the property right: the actor who controls the place.
//! `title_holder` is the ceremonial holder of rank. They usually coincide but
//! may diverge, e.g. while a regent governs on behalf of a minor.
//!
//! # Invariants
//!
//! - `rank` is always present (an `Arc` into the realm's rank table)
//! - `owner` is absent only on records that have been deserialized but not yet
//!   registered with a [`Realm`](super::Realm)
//! - `title_holder`, if present, resolves to exactly one registered actor once
//!   the place is registered

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::ids::{ActorId, NationalityId, PlaceId};
use crate::value_objects::{PlaceName, Rank, RoleTag};

/// Kind-specific data. Provinces and fiefs point at their parent place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlaceKind {
    Kingdom { nationality: NationalityId },
    Province { kingdom: PlaceId },
    Fief { province: PlaceId },
}

impl PlaceKind {
    pub fn tag(&self) -> PlaceKindTag {
        match self {
            PlaceKind::Kingdom { .. } => PlaceKindTag::Kingdom,
            PlaceKind::Province { .. } => PlaceKindTag::Province,
            PlaceKind::Fief { .. } => PlaceKindTag::Fief,
        }
    }

    /// The place one level up, if any.
    pub fn parent(&self) -> Option<&PlaceId> {
        match self {
            PlaceKind::Kingdom { .. } => None,
            PlaceKind::Province { kingdom } => Some(kingdom),
            PlaceKind::Fief { province } => Some(province),
        }
    }
}

/// Target kind tag carried by ownership challenges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceKindTag {
    Kingdom,
    Province,
    Fief,
}

impl PlaceKindTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceKindTag::Kingdom => "kingdom",
            PlaceKindTag::Province => "province",
            PlaceKindTag::Fief => "fief",
        }
    }

    /// Journal role of whoever currently owns a place of this kind.
    pub fn incumbent_role(&self) -> RoleTag {
        match self {
            PlaceKindTag::Kingdom => RoleTag::King,
            PlaceKindTag::Province => RoleTag::ProvinceOwner,
            PlaceKindTag::Fief => RoleTag::FiefOwner,
        }
    }
}

impl fmt::Display for PlaceKindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    id: PlaceId,
    name: PlaceName,
    #[serde(flatten)]
    kind: PlaceKind,
    #[serde(default)]
    owner: Option<ActorId>,
    #[serde(default)]
    title_holder: Option<ActorId>,
    rank: Arc<Rank>,
}

impl Place {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a place owned and held by `owner`.
    pub fn new(
        id: PlaceId,
        name: PlaceName,
        kind: PlaceKind,
        rank: Arc<Rank>,
        owner: ActorId,
    ) -> Self {
        Self {
            id,
            name,
            kind,
            title_holder: Some(owner.clone()),
            owner: Some(owner),
            rank,
        }
    }

    /// Set a title holder distinct from the owner (regency).
    pub fn with_title_holder(mut self, holder: ActorId) -> Self {
        self.title_holder = Some(holder);
        self
    }

    /// Clear the title holder (e.g. vacant title awaiting a claimant).
    pub fn without_title_holder(mut self) -> Self {
        self.title_holder = None;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> &PlaceId {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &PlaceName {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> &PlaceKind {
        &self.kind
    }

    #[inline]
    pub fn kind_tag(&self) -> PlaceKindTag {
        self.kind.tag()
    }

    pub fn is_kingdom(&self) -> bool {
        matches!(self.kind, PlaceKind::Kingdom { .. })
    }

    pub fn is_fief(&self) -> bool {
        matches!(self.kind, PlaceKind::Fief { .. })
    }

    pub fn nationality(&self) -> Option<&NationalityId> {
        match &self.kind {
            PlaceKind::Kingdom { nationality } => Some(nationality),
            _ => None,
        }
    }

    #[inline]
    pub fn owner(&self) -> Option<&ActorId> {
        self.owner.as_ref()
    }

    pub fn is_owned_by(&self, actor: &ActorId) -> bool {
        self.owner.as_ref() == Some(actor)
    }

    /// The raw title-holder id. Use `Realm::title_holder` to resolve it.
    #[inline]
    pub fn title_holder(&self) -> Option<&ActorId> {
        self.title_holder.as_ref()
    }

    #[inline]
    pub fn rank(&self) -> &Arc<Rank> {
        &self.rank
    }

    // =========================================================================
    // Mutations (realm-controlled)
    // =========================================================================

    pub(crate) fn set_owner(&mut self, owner: ActorId) {
        self.owner = Some(owner);
    }

    pub(crate) fn set_title_holder(&mut self, holder: ActorId) {
        self.title_holder = Some(holder);
    }

    pub(crate) fn relink_rank(&mut self, rank: Arc<Rank>) {
        self.rank = rank;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::RankId;

    fn king_rank() -> Arc<Rank> {
        Rank::new(RankId::new("1").expect("id"), "King", 6)
            .expect("rank")
            .shared()
    }

    fn kingdom() -> Place {
        Place::new(
            PlaceId::new("KING1").expect("id"),
            PlaceName::new("Kingdom of the Isles").expect("name"),
            PlaceKind::Kingdom {
                nationality: NationalityId::new("E").expect("id"),
            },
            king_rank(),
            ActorId::new("King_A").expect("id"),
        )
    }

    #[test]
    fn new_place_is_held_by_owner() {
        let place = kingdom();
        assert_eq!(place.owner(), place.title_holder());
        assert!(place.is_kingdom());
        assert_eq!(place.kind_tag().as_str(), "kingdom");
        assert_eq!(place.nationality().map(NationalityId::as_str), Some("E"));
    }

    #[test]
    fn regent_diverges_from_owner() {
        let heir = ActorId::new("Heir_C").expect("id");
        let place = kingdom().with_title_holder(heir.clone());
        assert_eq!(place.title_holder(), Some(&heir));
        assert!(place.is_owned_by(&ActorId::new("King_A").expect("id")));
    }

    #[test]
    fn deserialized_place_may_lack_owner() {
        let json = serde_json::json!({
            "id": "ESX02",
            "name": "Sussex",
            "kind": "fief",
            "province": "ESX",
            "rank": { "id": "6", "title": "Baron", "stature": 1 }
        });
        let place: Place = serde_json::from_value(json).expect("place");
        assert!(place.owner().is_none());
        assert!(place.is_fief());
        assert_eq!(place.kind().parent().map(PlaceId::as_str), Some("ESX"));
    }

    #[test]
    fn incumbent_roles_by_kind() {
        assert_eq!(PlaceKindTag::Kingdom.incumbent_role(), RoleTag::King);
        assert_eq!(PlaceKindTag::Fief.incumbent_role(), RoleTag::FiefOwner);
    }
}
