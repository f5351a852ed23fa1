//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod challenge_registry;
pub mod clock;
pub mod journal;
pub mod ports;
pub mod sequence;
pub mod settings;
pub mod telemetry;
