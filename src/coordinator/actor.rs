//! # Load Coordinator Actor
//!
//! The server half of the coordinator. Owns the per-kind slots, the progress
//! publisher and the set of in-flight fetch tasks, and mutates them from a single
//! task.

use super::message::{CoordinatorRequest, Settlement, SlotWriter};
use super::{LoadHandle, LoadProgress, LoadSnapshot, LoadedData, SlotStatus};
use crate::client::ResourceFetcher;
use crate::resource::{ResourceKind, ResourcePayload};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tracing::{debug, info, info_span, warn, Instrument};

#[derive(Debug)]
enum Slot {
    Pending,
    Resolved(ResourcePayload),
    Failed(String),
}

impl Slot {
    fn is_settled(&self) -> bool {
        !matches!(self, Slot::Pending)
    }

    fn status(&self) -> SlotStatus {
        match self {
            Slot::Pending => SlotStatus::Pending,
            Slot::Resolved(_) => SlotStatus::Resolved,
            Slot::Failed(cause) => SlotStatus::Failed {
                cause: cause.clone(),
            },
        }
    }
}

/// Coordinates one page load: every [`ResourceKind`] fetched at once, each settling
/// its own slot, one `ready` transition once all have settled.
///
/// # Usage
///
/// ```rust
/// use folio::client::mock::MockFetcher;
/// use folio::coordinator::LoadCoordinator;
/// use folio::resource::{ResourceKind, ResourcePayload};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() {
///     let mock = MockFetcher::new();
///     mock.expect(ResourceKind::Profile)
///         .return_err(folio::client::FetchCause::NotFound);
///     mock.expect(ResourceKind::Projects).return_ok(ResourcePayload::Projects(vec![]));
///     mock.expect(ResourceKind::Experiences).return_ok(ResourcePayload::Experiences(vec![]));
///     mock.expect(ResourceKind::Education).return_ok(ResourcePayload::Education(vec![]));
///     mock.expect(ResourceKind::Technologies).return_ok(ResourcePayload::Technologies(vec![]));
///
///     // 1. Create
///     let (coordinator, handle) = LoadCoordinator::new(8);
///
///     // 2. Wire & Run
///     tokio::spawn(coordinator.run(Arc::new(mock)));
///
///     // 3. Use
///     let data = handle.wait_ready().await.unwrap();
///     assert!(data.profile.is_none());
///     assert!(handle.is_ready());
/// }
/// ```
pub struct LoadCoordinator {
    receiver: mpsc::Receiver<CoordinatorRequest>,
    slots: BTreeMap<ResourceKind, Slot>,
    progress: watch::Sender<LoadProgress>,
}

impl LoadCoordinator {
    /// Creates the coordinator and its handle. `buffer_size` bounds queued handle
    /// requests; settlements use their own channel.
    pub fn new(buffer_size: usize) -> (Self, LoadHandle) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let slots: BTreeMap<_, _> = ResourceKind::ALL
            .into_iter()
            .map(|kind| (kind, Slot::Pending))
            .collect();
        let (progress, progress_rx) = watch::channel(LoadProgress::new(slots.len()));

        let coordinator = Self {
            receiver,
            slots,
            progress,
        };
        let handle = LoadHandle::new(sender, progress_rx);
        (coordinator, handle)
    }

    /// Creates the coordinator, spawns it with `fetcher` and returns the handle.
    pub fn start(fetcher: Arc<dyn ResourceFetcher>) -> LoadHandle {
        let (coordinator, handle) = Self::new(16);
        tokio::spawn(coordinator.run(fetcher));
        handle
    }

    /// Starts every fetch, then processes settlements and requests until torn down
    /// or until the last handle is dropped, even with fetches still running.
    ///
    /// Fetch tasks are aborted when this returns.
    pub async fn run(mut self, fetcher: Arc<dyn ResourceFetcher>) {
        let total = self.slots.len();
        let (settle_tx, mut settle_rx) = mpsc::channel::<Settlement>(total);
        let mut fetches = JoinSet::new();

        for kind in self.slots.keys().copied() {
            let writer = SlotWriter::new(kind, settle_tx.clone());
            let fetcher = fetcher.clone();
            fetches.spawn(
                async move {
                    let outcome = fetcher.fetch_kind(kind).await;
                    writer.settle(outcome);
                }
                .instrument(info_span!("fetch", %kind)),
            );
        }
        drop(settle_tx);
        info!(total, "Load started");

        loop {
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(CoordinatorRequest::Snapshot { respond_to }) => {
                        let _ = respond_to.send(self.snapshot());
                    }
                    Some(CoordinatorRequest::Teardown { respond_to }) => {
                        info!(settled = self.settled(), total, "Teardown requested");
                        settle_rx.close();
                        fetches.abort_all();
                        let _ = respond_to.send(());
                        break;
                    }
                    None => {
                        debug!("All handles dropped");
                        break;
                    }
                },
                Some(settlement) = settle_rx.recv() => self.settle(settlement),
                Some(joined) = fetches.join_next() => {
                    if let Err(e) = joined {
                        if e.is_panic() {
                            warn!(error = %e, "Fetch task panicked");
                        }
                    }
                }
            }
        }

        info!(settled = self.settled(), total, "Shutdown");
    }

    fn settle(&mut self, settlement: Settlement) {
        let Settlement { kind, outcome } = settlement;
        let Some(slot) = self.slots.get_mut(&kind) else {
            warn!(%kind, "No slot for kind, ignoring");
            return;
        };
        if slot.is_settled() {
            warn!(%kind, "Slot already settled, ignoring");
            return;
        }

        *slot = match outcome {
            Ok(payload) if payload.kind() == kind => {
                info!(%kind, records = payload.len(), "Resolved");
                Slot::Resolved(payload)
            }
            Ok(payload) => {
                let got = payload.kind();
                warn!(%kind, %got, "Payload kind mismatch, settling empty");
                Slot::Failed(format!("expected {kind} payload, got {got}"))
            }
            Err(e) if e.is_absent_profile() => {
                info!(%kind, "No profile, settling empty");
                Slot::Failed(e.to_string())
            }
            Err(e) => {
                warn!(%kind, status = ?e.status(), error = %e, "Fetch failed, settling empty");
                Slot::Failed(e.to_string())
            }
        };

        let progress = LoadProgress {
            settled: self.settled(),
            total: self.slots.len(),
        };
        self.progress.send_replace(progress);
        debug!(settled = progress.settled, total = progress.total, "Progress");
        if progress.is_ready() {
            info!(total = progress.total, "All resources settled");
        }
    }

    fn settled(&self) -> usize {
        self.slots.values().filter(|slot| slot.is_settled()).count()
    }

    fn snapshot(&self) -> LoadSnapshot {
        let mut data = LoadedData::default();
        for slot in self.slots.values() {
            if let Slot::Resolved(payload) = slot {
                data.apply(payload.clone());
            }
        }
        LoadSnapshot {
            slots: self
                .slots
                .iter()
                .map(|(kind, slot)| (*kind, slot.status()))
                .collect(),
            progress: *self.progress.borrow(),
            data,
        }
    }
}
