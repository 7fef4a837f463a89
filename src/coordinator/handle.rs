//! # Load Handle
//!
//! The client half of the coordinator. Progress is read straight from a watch
//! channel; snapshots and teardown go through the actor.

use super::message::CoordinatorRequest;
use super::{CoordinatorError, LoadProgress, LoadSnapshot, LoadedData};
use tokio::sync::{mpsc, oneshot, watch};

/// Observes and controls one load. Cheap to clone.
#[derive(Clone)]
pub struct LoadHandle {
    sender: mpsc::Sender<CoordinatorRequest>,
    progress: watch::Receiver<LoadProgress>,
}

impl LoadHandle {
    pub(crate) fn new(
        sender: mpsc::Sender<CoordinatorRequest>,
        progress: watch::Receiver<LoadProgress>,
    ) -> Self {
        Self { sender, progress }
    }

    /// Latest published progress.
    pub fn progress(&self) -> LoadProgress {
        *self.progress.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.progress().is_ready()
    }

    /// A receiver that sees every progress update from now on.
    pub fn subscribe(&self) -> watch::Receiver<LoadProgress> {
        self.progress.clone()
    }

    /// Copies the coordinator's current slots, progress and data.
    pub async fn snapshot(&self) -> Result<LoadSnapshot, CoordinatorError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CoordinatorRequest::Snapshot { respond_to })
            .await
            .map_err(|_| CoordinatorError::ActorClosed)?;
        response.await.map_err(|_| CoordinatorError::ActorDropped)
    }

    /// Waits until every kind has settled, then returns the resolved data.
    ///
    /// Errors with [`CoordinatorError::ActorClosed`] if the load is torn down first.
    pub async fn wait_ready(&self) -> Result<LoadedData, CoordinatorError> {
        let mut progress = self.progress.clone();
        progress
            .wait_for(|p| p.is_ready())
            .await
            .map_err(|_| CoordinatorError::ActorClosed)?;
        Ok(self.snapshot().await?.data)
    }

    /// Stops the load. In-flight fetches are aborted and any result arriving
    /// afterwards is discarded. Other clones of this handle see the coordinator
    /// as closed.
    pub async fn teardown(self) -> Result<(), CoordinatorError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CoordinatorRequest::Teardown { respond_to })
            .await
            .map_err(|_| CoordinatorError::ActorClosed)?;
        response.await.map_err(|_| CoordinatorError::ActorDropped)
    }
}
