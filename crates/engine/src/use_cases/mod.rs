//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.

pub mod authorization;
pub mod sovereignty;

pub use authorization::{Authorize, Target};
pub use sovereignty::SovereigntyUseCases;
