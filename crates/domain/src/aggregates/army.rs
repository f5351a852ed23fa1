//! Army aggregate - a military force with an owner and a current fief.

use serde::{Deserialize, Serialize};

use crate::ids::{ActorId, ArmyId, PlaceId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Army {
    id: ArmyId,
    owner: ActorId,
    location: PlaceId,
}

impl Army {
    pub fn new(id: ArmyId, owner: ActorId, location: PlaceId) -> Self {
        Self {
            id,
            owner,
            location,
        }
    }

    #[inline]
    pub fn id(&self) -> &ArmyId {
        &self.id
    }

    #[inline]
    pub fn owner(&self) -> &ActorId {
        &self.owner
    }

    #[inline]
    pub fn location(&self) -> &PlaceId {
        &self.location
    }

    pub(crate) fn set_location(&mut self, location: PlaceId) {
        self.location = location;
    }
}
