//! # Load Coordinator
//!
//! Turns five independent fetches into one atomic "ready" transition while still
//! reporting fine-grained progress.
//!
//! ## Shape
//!
//! The coordinator is an actor. [`LoadCoordinator::new`] returns the actor (server
//! half) and a [`LoadHandle`] (client half). [`LoadCoordinator::run`] receives the
//! [`ResourceFetcher`](crate::client::ResourceFetcher) as its context, starts every
//! fetch at once, then processes messages one at a time. The settlement map lives
//! inside the actor task, so no lock guards it.
//!
//! ```text
//!  fetch(profile) ──SlotWriter──┐
//!  fetch(projects) ─SlotWriter──┤
//!  ...                          ├──> LoadCoordinator ──watch──> LoadProgress
//!  LoadHandle ──snapshot/teardown┘        (slots)
//! ```
//!
//! ## Rules
//!
//! - Each kind goes `Pending -> Resolved` or `Pending -> Failed`; both are settled.
//! - `ready` means all kinds settled, whatever the outcome. A failed kind renders
//!   as empty instead of blocking the others.
//! - Only the fetch task for a kind can settle that kind's slot, and only once.
//! - After teardown, in-flight fetches are aborted and late results are dropped.

pub mod actor;
pub mod error;
pub mod handle;
pub mod message;
pub mod state;

pub use actor::*;
pub use error::*;
pub use handle::*;
pub use state::*;

use crate::client::ResourceFetcher;
use std::sync::Arc;
use tracing::info;

/// Loads every resource and returns the resolved data once all have settled.
///
/// Failed kinds come back empty; this only errors if the coordinator itself goes away.
pub async fn load_portfolio(
    fetcher: Arc<dyn ResourceFetcher>,
) -> Result<LoadedData, CoordinatorError> {
    let handle = LoadCoordinator::start(fetcher);
    let data = handle.wait_ready().await?;
    info!(
        profile = data.profile.is_some(),
        projects = data.projects.len(),
        "Portfolio loaded"
    );
    handle.teardown().await?;
    Ok(data)
}
