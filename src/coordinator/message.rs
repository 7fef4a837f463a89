//! # Coordinator Messages
//!
//! Two channels feed the coordinator. Requests come from [`LoadHandle`](super::LoadHandle)s;
//! settlements come only from the fetch tasks the coordinator spawned, each through
//! the single [`SlotWriter`] for its kind. Neither type is constructible outside
//! the crate, so nothing else can write to the settlement map.

use super::LoadSnapshot;
use crate::client::{FetchCause, FetchError};
use crate::resource::{ResourceKind, ResourcePayload};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

/// One-shot reply channel.
pub type Response<T> = oneshot::Sender<T>;

/// Requests a handle can make.
#[derive(Debug)]
pub(crate) enum CoordinatorRequest {
    Snapshot { respond_to: Response<LoadSnapshot> },
    Teardown { respond_to: Response<()> },
}

/// A finished fetch.
#[derive(Debug)]
pub(crate) struct Settlement {
    pub kind: ResourceKind,
    pub outcome: Result<ResourcePayload, FetchError>,
}

/// Write access to exactly one slot, usable once.
///
/// Dropping a writer without settling (the fetch task panicked or was aborted)
/// settles the slot as failed, so a broken fetch can never hold readiness back.
#[derive(Debug)]
pub(crate) struct SlotWriter {
    kind: ResourceKind,
    sender: Option<mpsc::Sender<Settlement>>,
}

impl SlotWriter {
    pub fn new(kind: ResourceKind, sender: mpsc::Sender<Settlement>) -> Self {
        Self {
            kind,
            sender: Some(sender),
        }
    }

    pub fn settle(mut self, outcome: Result<ResourcePayload, FetchError>) {
        if let Some(sender) = self.sender.take() {
            deliver(&sender, Settlement {
                kind: self.kind,
                outcome,
            });
        }
    }
}

impl Drop for SlotWriter {
    fn drop(&mut self) {
        if let Some(sender) = self.sender.take() {
            let cause = FetchCause::Interrupted;
            deliver(&sender, Settlement {
                kind: self.kind,
                outcome: Err(FetchError::new(self.kind, cause)),
            });
        }
    }
}

// The settlement channel has one buffer slot per kind and each writer sends at
// most once, so `try_send` can only fail once the coordinator is gone.
fn deliver(sender: &mpsc::Sender<Settlement>, settlement: Settlement) {
    let kind = settlement.kind;
    if sender.try_send(settlement).is_err() {
        debug!(%kind, "Coordinator gone, discarding late result");
    }
}
