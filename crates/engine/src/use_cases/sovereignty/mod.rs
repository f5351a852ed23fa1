//! Sovereignty use cases.
//!
//! The ownership-challenge flow is:
//! 1. A living actor lodges a challenge against a place it does not own (LodgeChallenge)
//! 2. The registry holds it as the place's one pending challenge
//! 3. An external resolver reaches a verdict (ResolveChallenge)
//! 4. An upheld verdict moves the title (TransferOwnership)
//!
//! Every step that changes the challenge's status is announced in the journal.

use std::sync::Arc;

mod error;
mod lodge_challenge;
mod notice;
mod resolve_challenge;
mod transfer_ownership;

pub use error::{ChallengeError, ErrorKind, ResolveError, TransferError};
pub use lodge_challenge::{LodgeChallenge, LodgedChallenge};
pub use notice::ChallengeNotice;
pub use resolve_challenge::{ResolveChallenge, Verdict};
pub use transfer_ownership::TransferOwnership;

/// Container for sovereignty use cases.
pub struct SovereigntyUseCases {
    pub lodge: Arc<LodgeChallenge>,
    pub transfer: Arc<TransferOwnership>,
    pub resolve: Arc<ResolveChallenge>,
}

impl SovereigntyUseCases {
    pub fn new(
        lodge: Arc<LodgeChallenge>,
        transfer: Arc<TransferOwnership>,
        resolve: Arc<ResolveChallenge>,
    ) -> Self {
        Self {
            lodge,
            transfer,
            resolve,
        }
    }
}
