use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum length for string keys (actor, place, army identifiers)
const MAX_KEY_LENGTH: usize = 64;

/// String-keyed identifiers. Keys are the stable names the world is authored
/// with (`"King_A"`, `"KING1"`), not generated values.
macro_rules! define_key {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(key: impl Into<String>) -> Result<Self, DomainError> {
                let key = key.into();
                let trimmed = key.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_id(concat!($label, " cannot be empty")));
                }
                if trimmed.len() > MAX_KEY_LENGTH {
                    return Err(DomainError::invalid_id(format!(
                        "{} cannot exceed {} characters",
                        $label, MAX_KEY_LENGTH
                    )));
                }
                if trimmed.contains('|') {
                    return Err(DomainError::invalid_id(concat!(
                        $label,
                        " cannot contain '|'"
                    )));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = DomainError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

/// Monotonically issued identifiers. Only the sequence adapters mint new
/// values; `from_raw` exists for restoring persisted records.
macro_rules! define_sequence_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(u64);

        impl $name {
            pub fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// Actors and what they own
define_key!(ActorId, "Actor id");
define_key!(ArmyId, "Army id");

// Sovereign places
define_key!(PlaceId, "Place id");
define_key!(RankId, "Rank id");
define_key!(NationalityId, "Nationality id");

// Issued by the sequence port
define_sequence_id!(ChallengeId);
define_sequence_id!(JournalEntryId);
