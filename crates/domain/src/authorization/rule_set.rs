//! Rule-sets and the authorization combinator.

use std::fmt;
use std::sync::Arc;

use crate::aggregates::{Actor, Realm};
use crate::error::DomainError;

use super::predicates::{Predicate, Resource};

/// A non-empty, ordered, immutable list of predicates combined with OR.
#[derive(Clone)]
pub struct RuleSet {
    name: &'static str,
    predicates: Arc<[Arc<dyn Predicate>]>,
}

impl RuleSet {
    /// Build a rule-set from a dynamic list.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when `predicates` is empty.
    pub fn new(
        name: &'static str,
        predicates: Vec<Arc<dyn Predicate>>,
    ) -> Result<Self, DomainError> {
        if predicates.is_empty() {
            return Err(DomainError::validation(format!(
                "Rule-set {name} needs at least one predicate"
            )));
        }
        Ok(Self {
            name,
            predicates: predicates.into(),
        })
    }

    /// Build a rule-set that is non-empty by construction.
    pub fn any_of(
        name: &'static str,
        first: impl Predicate + 'static,
        rest: impl IntoIterator<Item = Arc<dyn Predicate>>,
    ) -> Self {
        let mut predicates: Vec<Arc<dyn Predicate>> = vec![Arc::new(first)];
        predicates.extend(rest);
        Self {
            name,
            predicates: predicates.into(),
        }
    }

    pub fn single(name: &'static str, predicate: impl Predicate + 'static) -> Self {
        let only: Arc<dyn Predicate> = Arc::new(predicate);
        Self {
            name,
            predicates: Arc::from(vec![only]),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn predicates(&self) -> impl Iterator<Item = &dyn Predicate> {
        self.predicates.iter().map(|p| p.as_ref())
    }

    /// Name of the first predicate (left to right) the actor satisfies.
    pub fn first_satisfied(
        &self,
        realm: &Realm,
        actor: &Actor,
        resource: Option<Resource<'_>>,
    ) -> Option<&'static str> {
        self.predicates
            .iter()
            .find(|p| p.evaluate(realm, actor, resource))
            .map(|p| p.name())
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("name", &self.name)
            .field(
                "predicates",
                &self.predicates().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Outcome of an authorization check, kept for audit logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Granted by the named predicate.
    Granted { by: &'static str },
    /// The actor is dead; no predicate was consulted.
    DeniedDeceased,
    /// No predicate in the rule-set was satisfied.
    DeniedUnsatisfied,
}

impl Decision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Decision::Granted { .. })
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Granted { by } => write!(f, "granted by {by}"),
            Decision::DeniedDeceased => write!(f, "denied: actor is dead"),
            Decision::DeniedUnsatisfied => write!(f, "denied: no rule satisfied"),
        }
    }
}

/// Evaluate `rule_set` for `actor` on `resource`.
///
/// The liveness gate always applies: a dead actor is denied even if a
/// predicate such as `IsAdmin` would pass.
pub fn decide(
    rule_set: &RuleSet,
    realm: &Realm,
    actor: &Actor,
    resource: Option<Resource<'_>>,
) -> Decision {
    if !actor.is_alive() {
        return Decision::DeniedDeceased;
    }
    match rule_set.first_satisfied(realm, actor, resource) {
        Some(by) => Decision::Granted { by },
        None => Decision::DeniedUnsatisfied,
    }
}

/// `actor.is_alive AND OR(rule_set)`.
pub fn authorize(
    rule_set: &RuleSet,
    realm: &Realm,
    actor: &Actor,
    resource: Option<Resource<'_>>,
) -> bool {
    decide(rule_set, realm, actor, resource).is_granted()
}
