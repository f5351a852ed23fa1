//! Authorization - "may this actor do X to Y".
//!
//! - [`predicates`]: pure capability tests between an actor and a resource
//! - [`RuleSet`]: an ordered OR of predicates
//! - [`authorize`] / [`decide`]: the only way to evaluate a rule-set; the
//!   liveness gate is applied here and cannot be skipped
//! - [`StandardRuleSets`]: the rule-sets privileged actions use

pub mod predicates;
mod rule_set;
mod standard;

pub use predicates::{Predicate, Resource};
pub use rule_set::{authorize, decide, Decision, RuleSet};
pub use standard::StandardRuleSets;
