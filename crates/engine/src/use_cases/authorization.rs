//! Authorization use case.
//!
//! Resolves ids against a read snapshot of the realm and evaluates a
//! rule-set. Denial is an ordinary answer, never an error.

use std::sync::Arc;

use suzerain_domain::{decide, ActorId, ArmyId, Decision, PlaceId, Realm, Resource, RuleSet};
use tokio::sync::RwLock;

/// What an authorization check is about, by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Army(ArmyId),
    Place(PlaceId),
    Actor(ActorId),
    /// Single-actor checks (roles, liveness).
    Nothing,
}

pub struct Authorize {
    realm: Arc<RwLock<Realm>>,
}

impl Authorize {
    pub fn new(realm: Arc<RwLock<Realm>>) -> Self {
        Self { realm }
    }

    /// `true` when `actor_id` is alive and satisfies `rule_set` on `target`.
    pub async fn execute(&self, rule_set: &RuleSet, actor_id: &ActorId, target: &Target) -> bool {
        self.decide(rule_set, actor_id, target).await.is_granted()
    }

    /// Like [`execute`](Self::execute), keeping the reason for audit logs.
    ///
    /// An unknown actor is denied. An unknown target resolves to no resource,
    /// which no resource-bound predicate accepts.
    pub async fn decide(&self, rule_set: &RuleSet, actor_id: &ActorId, target: &Target) -> Decision {
        let realm = self.realm.read().await;
        let Some(actor) = realm.actor(actor_id) else {
            tracing::debug!(
                actor_id = %actor_id,
                rule_set = rule_set.name(),
                "Authorization denied: unknown actor"
            );
            return Decision::DeniedUnsatisfied;
        };

        let resource = resolve(&realm, target);
        let decision = decide(rule_set, &realm, actor, resource);
        tracing::debug!(
            actor_id = %actor_id,
            rule_set = rule_set.name(),
            target = ?target,
            decision = %decision,
            "Authorization decided"
        );
        decision
    }
}

fn resolve<'a>(realm: &'a Realm, target: &Target) -> Option<Resource<'a>> {
    match target {
        Target::Army(id) => realm.army(id).map(Resource::from),
        Target::Place(id) => realm.place(id).map(Resource::from),
        Target::Actor(id) => realm.actor(id).map(Resource::from),
        Target::Nothing => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{self, ids};
    use suzerain_domain::StandardRuleSets;

    fn use_case() -> Authorize {
        Authorize::new(Arc::new(RwLock::new(test_fixtures::canonical_realm())))
    }

    #[tokio::test]
    async fn owner_commands_own_army() {
        let rules = StandardRuleSets::new();
        let authorize = use_case();
        let army = Target::Army(ids::army("ARMY_KING"));
        assert!(authorize.execute(&rules.army_control, &ids::actor("King_A"), &army).await);
        assert!(!authorize.execute(&rules.army_control, &ids::actor("Pretender_B"), &army).await);
    }

    #[tokio::test]
    async fn admin_override_is_reported() {
        let rules = StandardRuleSets::new();
        let decision = use_case()
            .decide(
                &rules.army_control,
                &ids::actor("Admin_Z"),
                &Target::Army(ids::army("ARMY_KING")),
            )
            .await;
        assert_eq!(decision, Decision::Granted { by: "is_admin" });
    }

    #[tokio::test]
    async fn unknown_ids_are_denied_not_errors() {
        let rules = StandardRuleSets::new();
        let authorize = use_case();
        assert!(
            !authorize
                .execute(&rules.lodge_challenge, &ids::actor("Nobody"), &Target::Nothing)
                .await
        );
        assert!(
            !authorize
                .execute(
                    &rules.fief_management,
                    &ids::actor("King_A"),
                    &Target::Place(ids::place("NOWHERE"))
                )
                .await
        );
    }

    #[tokio::test]
    async fn dead_actor_denied_everything() {
        let rules = StandardRuleSets::new();
        let authorize = use_case();
        authorize
            .realm
            .write()
            .await
            .record_death(&ids::actor("King_A"))
            .expect("death");

        let decision = authorize
            .decide(
                &rules.army_control,
                &ids::actor("King_A"),
                &Target::Army(ids::army("ARMY_KING")),
            )
            .await;
        assert_eq!(decision, Decision::DeniedDeceased);
        assert!(
            !authorize
                .execute(&rules.lodge_challenge, &ids::actor("King_A"), &Target::Nothing)
                .await
        );
    }
}
