//! Test fixtures: the canonical realm and id helpers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{self, ids};
//!
//! let realm = test_fixtures::canonical_realm();
//! let king = realm.actor(&ids::actor("King_A"));
//! ```
//!
//! # The canonical realm
//!
//! | Place  | Kind     | Owner      |
//! |--------|----------|------------|
//! | KING1  | kingdom  | King_A     |
//! | KING2  | kingdom  | Queen_Q    |
//! | ESX    | province | King_A     |
//! | ESX01, ESX03-ESX08 | fief | King_A |
//! | ESX02  | fief     | Baron_C    |
//!
//! King_A wears crown slot one and Queen_Q crown slot two. Admin_Z is the
//! only administrator. Steward_D works for King_A and waits in ESX01;
//! Prince_E is King_A's designated heir. Pretender_B owns nothing.

use std::sync::Arc;

use suzerain_domain::{
    Actor, ActorName, Army, CrownSlot, NationalityId, Place, PlaceKind, PlaceName, Rank, RankId,
    Realm,
};

use crate::app::App;
use crate::infrastructure::settings::AuthoritySettings;

pub mod ids {
    use suzerain_domain::{ActorId, ArmyId, PlaceId};

    pub fn actor(id: &str) -> ActorId {
        ActorId::new(id).expect("valid actor id")
    }

    pub fn place(id: &str) -> PlaceId {
        PlaceId::new(id).expect("valid place id")
    }

    pub fn army(id: &str) -> ArmyId {
        ArmyId::new(id).expect("valid army id")
    }
}

/// Fiefs of ESX owned by King_A, free to be challenged independently.
pub const KING_A_FIEFS: [&str; 7] = ["ESX01", "ESX03", "ESX04", "ESX05", "ESX06", "ESX07", "ESX08"];

fn player(id: &str) -> Actor {
    Actor::player(ids::actor(id), ActorName::new(id).expect("valid name"))
}

fn non_player(id: &str) -> Actor {
    Actor::non_player(ids::actor(id), ActorName::new(id).expect("valid name"))
}

fn rank(realm: &mut Realm, id: &str, title: &str, stature: u8) -> Arc<Rank> {
    realm
        .add_rank(Rank::new(RankId::new(id).expect("valid rank id"), title, stature).expect("rank"))
        .expect("unique rank")
}

fn place(realm: &mut Realm, id: &str, kind: PlaceKind, rank: &Arc<Rank>, owner: &str) {
    realm
        .add_place(Place::new(
            ids::place(id),
            PlaceName::new(id).expect("valid name"),
            kind,
            Arc::clone(rank),
            ids::actor(owner),
        ))
        .expect("valid place");
}

pub fn canonical_realm() -> Realm {
    let mut realm = Realm::with_admins([ids::actor("Admin_Z")]);
    let king = rank(&mut realm, "1", "King", 6);
    let earl = rank(&mut realm, "3", "Earl", 4);
    let baron = rank(&mut realm, "6", "Baron", 1);

    let mut king_a = player("King_A").with_title(ids::place("KING1")).with_title(ids::place("ESX"));
    for fief in KING_A_FIEFS {
        king_a = king_a.with_title(ids::place(fief));
    }
    for actor in [
        king_a,
        player("Queen_Q").with_title(ids::place("KING2")),
        player("Pretender_B"),
        player("Baron_C").with_title(ids::place("ESX02")),
        player("Admin_Z"),
        non_player("Steward_D"),
        non_player("Prince_E").as_heir(),
    ] {
        realm.add_actor(actor).expect("unique actor");
    }
    realm
        .employ(&ids::actor("King_A"), &ids::actor("Steward_D"))
        .expect("employ");
    realm
        .adopt(&ids::actor("King_A"), &ids::actor("Prince_E"))
        .expect("adopt");

    place(
        &mut realm,
        "KING1",
        PlaceKind::Kingdom {
            nationality: NationalityId::new("E").expect("id"),
        },
        &king,
        "King_A",
    );
    place(
        &mut realm,
        "KING2",
        PlaceKind::Kingdom {
            nationality: NationalityId::new("F").expect("id"),
        },
        &king,
        "Queen_Q",
    );
    place(
        &mut realm,
        "ESX",
        PlaceKind::Province {
            kingdom: ids::place("KING1"),
        },
        &earl,
        "King_A",
    );
    for fief in KING_A_FIEFS {
        place(
            &mut realm,
            fief,
            PlaceKind::Fief {
                province: ids::place("ESX"),
            },
            &baron,
            "King_A",
        );
    }
    place(
        &mut realm,
        "ESX02",
        PlaceKind::Fief {
            province: ids::place("ESX"),
        },
        &baron,
        "Baron_C",
    );

    realm
        .relocate(&ids::actor("Steward_D"), &ids::place("ESX01"))
        .expect("relocate");
    realm
        .add_army(Army::new(
            ids::army("ARMY_KING"),
            ids::actor("King_A"),
            ids::place("ESX01"),
        ))
        .expect("army");
    realm
        .add_army(Army::new(
            ids::army("ARMY_BARON"),
            ids::actor("Baron_C"),
            ids::place("ESX02"),
        ))
        .expect("army");

    realm
        .crown(CrownSlot::First, &ids::actor("King_A"))
        .expect("crown");
    realm
        .crown(CrownSlot::Second, &ids::actor("Queen_Q"))
        .expect("crown");
    realm
}

/// A fully wired app over the canonical realm with default settings.
pub fn app() -> App {
    App::new(canonical_realm(), &AuthoritySettings::default())
}
