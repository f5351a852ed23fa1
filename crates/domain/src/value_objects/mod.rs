//! Value objects - Immutable objects defined by their attributes

mod calendar;
mod names;
mod persona;
mod rank;

pub use calendar::{GameDate, Season};
pub use names::{ActorName, PlaceName};
pub use persona::{Persona, RoleTag};
pub use rank::Rank;
