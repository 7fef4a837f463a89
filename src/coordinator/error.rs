//! Errors surfaced by [`LoadHandle`](super::LoadHandle).

use thiserror::Error;

/// The coordinator could not be reached. Fetch failures never show up here;
/// they settle their slot as empty instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoordinatorError {
    #[error("Coordinator closed")]
    ActorClosed,
    #[error("Coordinator dropped response channel")]
    ActorDropped,
}
