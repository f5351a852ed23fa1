//! Rank descriptors shared by every place of that rank.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::DomainError;
use crate::ids::RankId;

/// An immutable rank descriptor (King, Earl, Baron...).
///
/// Places hold an `Arc<Rank>`; the realm's rank table owns the canonical copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rank {
    id: RankId,
    title: String,
    /// Higher stature outranks lower.
    stature: u8,
}

impl Rank {
    pub fn new(id: RankId, title: impl Into<String>, stature: u8) -> Result<Self, DomainError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(DomainError::validation("Rank title cannot be empty"));
        }
        Ok(Self { id, title, stature })
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn id(&self) -> &RankId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn stature(&self) -> u8 {
        self.stature
    }

    pub fn outranks(&self, other: &Rank) -> bool {
        self.stature > other.stature
    }
}
