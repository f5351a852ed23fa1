//! Title-transfer use case.
//!
//! Trusted: callers establish authorization first. The whole mutation runs
//! under the realm's write guard, so readers see either the old state or the
//! new one.

use std::sync::Arc;

use suzerain_domain::{ActorId, DomainError, PlaceId, Realm, TitleTransfer};
use tokio::sync::RwLock;

use super::error::TransferError;

pub struct TransferOwnership {
    realm: Arc<RwLock<Realm>>,
}

impl TransferOwnership {
    pub fn new(realm: Arc<RwLock<Realm>>) -> Self {
        Self { realm }
    }

    pub async fn execute(
        &self,
        place_id: &PlaceId,
        new_owner: &ActorId,
    ) -> Result<TitleTransfer, TransferError> {
        let outcome = {
            let mut realm = self.realm.write().await;
            realm.transfer_title(place_id, new_owner)
        };

        match outcome {
            Ok(transfer) => {
                tracing::info!(
                    place_id = %place_id,
                    previous_owner = ?transfer.previous_owner,
                    new_owner = %new_owner,
                    crown_slots = ?transfer.crown_slots_passed,
                    "Title transferred"
                );
                Ok(transfer)
            }
            Err(DomainError::NotFound { entity_type: "Place", .. }) => {
                Err(TransferError::PlaceNotFound(place_id.clone()))
            }
            Err(DomainError::NotFound { entity_type: "Actor", .. }) => {
                Err(TransferError::NewOwnerNotFound(new_owner.clone()))
            }
            Err(e) if e.is_data_consistency() => {
                tracing::error!(
                    place_id = %place_id,
                    new_owner = %new_owner,
                    error = %e,
                    "Title transfer aborted on inconsistent realm state"
                );
                Err(TransferError::DataConsistency {
                    place_id: place_id.clone(),
                    source: e,
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use suzerain_domain::{CrownSlot, Place, PlaceKind, PlaceName};

    use super::*;
    use crate::test_fixtures::{self, ids};
    use crate::use_cases::sovereignty::ErrorKind;

    fn use_case(realm: Realm) -> (TransferOwnership, Arc<RwLock<Realm>>) {
        let realm = Arc::new(RwLock::new(realm));
        (TransferOwnership::new(realm.clone()), realm)
    }

    #[tokio::test]
    async fn kingdom_transfer_moves_slot_one_only() {
        let (transfer, realm) = use_case(test_fixtures::canonical_realm());

        let outcome = transfer
            .execute(&ids::place("KING1"), &ids::actor("Pretender_B"))
            .await
            .expect("transfer");
        assert_eq!(outcome.crown_slots_passed, vec![CrownSlot::First]);

        let realm = realm.read().await;
        assert_eq!(
            realm.crown_slots().get(CrownSlot::First),
            Some(&ids::actor("Pretender_B"))
        );
        assert_eq!(
            realm.crown_slots().get(CrownSlot::Second),
            Some(&ids::actor("Queen_Q"))
        );
    }

    #[tokio::test]
    async fn transfer_snapshot_is_complete() {
        let (transfer, realm) = use_case(test_fixtures::canonical_realm());
        transfer
            .execute(&ids::place("ESX02"), &ids::actor("Pretender_B"))
            .await
            .expect("transfer");

        let realm = realm.read().await;
        let fief = realm.place(&ids::place("ESX02")).expect("fief");
        assert!(fief.is_owned_by(&ids::actor("Pretender_B")));
        assert_eq!(fief.title_holder(), Some(&ids::actor("Pretender_B")));
        assert!(!realm
            .actor(&ids::actor("Baron_C"))
            .expect("baron")
            .holds_title(&ids::place("ESX02")));
        assert!(realm
            .actor(&ids::actor("Pretender_B"))
            .expect("pretender")
            .holds_title(&ids::place("ESX02")));
    }

    #[tokio::test]
    async fn missing_title_is_a_consistency_fault() {
        let mut realm = test_fixtures::canonical_realm();
        // Baron_C is named title holder of ESX09 without holding the title
        let baron = Arc::clone(
            realm
                .place(&ids::place("ESX02"))
                .expect("fief")
                .rank(),
        );
        realm
            .add_place(
                Place::new(
                    ids::place("ESX09"),
                    PlaceName::new("Epping").expect("name"),
                    PlaceKind::Fief {
                        province: ids::place("ESX"),
                    },
                    baron,
                    ids::actor("King_A"),
                )
                .with_title_holder(ids::actor("Baron_C")),
            )
            .expect("fief");
        let (transfer, realm) = use_case(realm);

        let err = transfer
            .execute(&ids::place("ESX09"), &ids::actor("Pretender_B"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataConsistencyFault);

        let realm = realm.read().await;
        let fief = realm.place(&ids::place("ESX09")).expect("fief");
        assert!(fief.is_owned_by(&ids::actor("King_A")));
        assert!(!realm
            .actor(&ids::actor("Pretender_B"))
            .expect("pretender")
            .holds_title(&ids::place("ESX09")));
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let (transfer, _) = use_case(test_fixtures::canonical_realm());
        assert!(matches!(
            transfer
                .execute(&ids::place("NOWHERE"), &ids::actor("Pretender_B"))
                .await,
            Err(TransferError::PlaceNotFound(_))
        ));
        assert!(matches!(
            transfer
                .execute(&ids::place("KING1"), &ids::actor("Nobody"))
                .await,
            Err(TransferError::NewOwnerNotFound(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn readers_never_observe_a_half_applied_transfer() {
        let (transfer, realm) = use_case(test_fixtures::canonical_realm());
        let transfer = Arc::new(transfer);
        let claimants = ["Pretender_B", "Baron_C", "Queen_Q", "King_A"];

        let writer = {
            let transfer = transfer.clone();
            tokio::spawn(async move {
                for round in 0..200 {
                    let claimant = ids::actor(claimants[round % claimants.len()]);
                    transfer
                        .execute(&ids::place("ESX01"), &claimant)
                        .await
                        .expect("transfer");
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let realm = realm.clone();
                tokio::spawn(async move {
                    for _ in 0..200 {
                        let realm = realm.read().await;
                        let fief = realm.place(&ids::place("ESX01")).expect("fief");
                        let owner = fief.owner().expect("owned").clone();
                        assert_eq!(fief.title_holder(), Some(&owner));
                        let holders = realm
                            .players()
                            .filter(|a| a.holds_title(&ids::place("ESX01")))
                            .map(|a| a.id().clone())
                            .collect::<Vec<_>>();
                        assert_eq!(holders, vec![owner]);
                        drop(realm);
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();

        writer.await.expect("writer");
        for reader in readers {
            reader.await.expect("reader");
        }
    }
}
