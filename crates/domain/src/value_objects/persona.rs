//! Journal addressing: who a notification concerns and in what capacity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::ids::ActorId;

const BROADCAST: &str = "all";

/// The capacity in which a persona appears in a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoleTag {
    King,
    ProvinceOwner,
    FiefOwner,
    Pretender,
    All,
}

impl RoleTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleTag::King => "king",
            RoleTag::ProvinceOwner => "provinceOwner",
            RoleTag::FiefOwner => "fiefOwner",
            RoleTag::Pretender => "pretender",
            RoleTag::All => BROADCAST,
        }
    }
}

impl fmt::Display for RoleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleTag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "king" => Ok(RoleTag::King),
            "provinceOwner" => Ok(RoleTag::ProvinceOwner),
            "fiefOwner" => Ok(RoleTag::FiefOwner),
            "pretender" => Ok(RoleTag::Pretender),
            BROADCAST => Ok(RoleTag::All),
            other => Err(DomainError::validation(format!("Unknown role tag: {other}"))),
        }
    }
}

/// An `actorId|roleTag` pair, or the `all|all` broadcast sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Persona {
    Actor { actor_id: ActorId, role: RoleTag },
    Everyone,
}

impl Persona {
    pub fn actor(actor_id: ActorId, role: RoleTag) -> Self {
        Persona::Actor { actor_id, role }
    }

    pub fn broadcast() -> Self {
        Persona::Everyone
    }

    pub fn actor_id(&self) -> Option<&ActorId> {
        match self {
            Persona::Actor { actor_id, .. } => Some(actor_id),
            Persona::Everyone => None,
        }
    }

    pub fn role(&self) -> RoleTag {
        match self {
            Persona::Actor { role, .. } => *role,
            Persona::Everyone => RoleTag::All,
        }
    }

    /// Whether an entry carrying this persona should reach `actor_id`.
    pub fn addresses(&self, actor_id: &ActorId) -> bool {
        match self {
            Persona::Actor { actor_id: own, .. } => own == actor_id,
            Persona::Everyone => true,
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Persona::Actor { actor_id, role } => write!(f, "{actor_id}|{role}"),
            Persona::Everyone => write!(f, "{BROADCAST}|{BROADCAST}"),
        }
    }
}

impl FromStr for Persona {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (subject, role) = s
            .split_once('|')
            .ok_or_else(|| DomainError::validation(format!("Malformed persona: {s}")))?;
        let role: RoleTag = role.parse()?;
        match (subject, role) {
            (BROADCAST, RoleTag::All) => Ok(Persona::Everyone),
            (BROADCAST, _) | (_, RoleTag::All) => Err(DomainError::validation(format!(
                "Broadcast persona must be {BROADCAST}|{BROADCAST}: {s}"
            ))),
            (actor, role) => Ok(Persona::actor(ActorId::new(actor)?, role)),
        }
    }
}

impl TryFrom<String> for Persona {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Persona> for String {
    fn from(persona: Persona) -> Self {
        persona.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_actor_and_broadcast() {
        let king = Persona::actor(ActorId::new("King_A").expect("id"), RoleTag::King);
        assert_eq!(king.to_string(), "King_A|king");
        assert_eq!(Persona::broadcast().to_string(), "all|all");
    }

    #[test]
    fn parses_what_it_formats() {
        let parsed: Persona = "Pretender_B|pretender".parse().expect("persona");
        assert_eq!(parsed.role(), RoleTag::Pretender);
        assert_eq!(parsed.actor_id().map(ActorId::as_str), Some("Pretender_B"));
        assert_eq!("all|all".parse::<Persona>(), Ok(Persona::Everyone));
    }

    #[test]
    fn half_broadcast_rejected() {
        assert!("all|king".parse::<Persona>().is_err());
        assert!("King_A|all".parse::<Persona>().is_err());
        assert!("King_A".parse::<Persona>().is_err());
    }

    #[test]
    fn broadcast_addresses_everyone() {
        let someone = ActorId::new("Baron_C").expect("id");
        assert!(Persona::broadcast().addresses(&someone));
        let king = Persona::actor(ActorId::new("King_A").expect("id"), RoleTag::King);
        assert!(!king.addresses(&someone));
    }
}
