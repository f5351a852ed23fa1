//! Suzerain Engine library.
//!
//! Server-side authority for a feudal realm: who may act on what, the
//! ownership-challenge workflow, and title transfers.
//!
//! ## Structure
//!
//! - `use_cases/` - Authorization checks and the sovereignty flow
//! - `infrastructure/` - Ports and their in-memory adapters
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Canonical realm and builders shared by unit tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
