//! # Mock Fetcher
//!
//! An in-memory [`ResourceFetcher`] for testing the load coordinator without HTTP.
//!
//! Each resource kind gets at most one expectation: what to return and how long to
//! take. The mock also records which kinds were requested and the peak number of
//! fetches in flight at once, so tests can assert that fetches start together.
//!
//! ```rust
//! use folio::client::mock::MockFetcher;
//! use folio::client::{FetchCause, ResourceFetcher};
//! use folio::resource::{ResourceKind, ResourcePayload};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockFetcher::new();
//!     mock.expect(ResourceKind::Projects)
//!         .after(Duration::from_millis(5))
//!         .return_ok(ResourcePayload::Projects(vec![]));
//!     mock.expect(ResourceKind::Profile).return_err(FetchCause::NotFound);
//!
//!     assert!(mock.fetch_kind(ResourceKind::Projects).await.is_ok());
//!     assert!(mock.fetch_kind(ResourceKind::Profile).await.is_err());
//!     mock.verify();
//! }
//! ```
//!
//! A kind fetched without an expectation fails with HTTP 501 and makes
//! [`MockFetcher::verify`] panic.

use super::{FetchCause, FetchError, ResourceFetcher};
use crate::resource::{ResourceKind, ResourcePayload};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

enum Behavior {
    Respond(Result<ResourcePayload, FetchCause>),
    Hang,
}

struct Expectation {
    delay: Duration,
    behavior: Behavior,
}

#[derive(Default)]
struct MockState {
    expectations: Mutex<HashMap<ResourceKind, Expectation>>,
    calls: Mutex<Vec<ResourceKind>>,
    unexpected: Mutex<Vec<ResourceKind>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    completed: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A fetcher answering from pre-set expectations. Clones share state.
#[derive(Clone, Default)]
pub struct MockFetcher {
    state: Arc<MockState>,
}

impl MockFetcher {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the expectation for `kind`, replacing any previous one.
    pub fn expect(&self, kind: ResourceKind) -> ExpectationBuilder {
        ExpectationBuilder {
            kind,
            delay: Duration::ZERO,
            state: self.state.clone(),
        }
    }

    /// Kinds requested so far, in call order.
    pub fn calls(&self) -> Vec<ResourceKind> {
        lock(&self.state.calls).clone()
    }

    /// Highest number of fetches that were in progress at the same moment.
    pub fn max_in_flight(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }

    /// Fetches that ran to completion (not aborted).
    pub fn completed(&self) -> usize {
        self.state.completed.load(Ordering::SeqCst)
    }

    /// Verifies that every expectation was consumed and nothing unexpected was fetched.
    pub fn verify(&self) {
        let unexpected = lock(&self.state.unexpected);
        if !unexpected.is_empty() {
            panic!("Unexpected fetches: {:?}", *unexpected);
        }
        let remaining = lock(&self.state.expectations);
        if !remaining.is_empty() {
            let kinds: Vec<_> = remaining.keys().collect();
            panic!("Not all expectations were met. Remaining: {kinds:?}");
        }
    }
}

/// Decrements the in-flight counter even when the fetch is aborted mid-delay.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ResourceFetcher for MockFetcher {
    async fn fetch_kind(&self, kind: ResourceKind) -> Result<ResourcePayload, FetchError> {
        lock(&self.state.calls).push(kind);
        let now = self.state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.state.in_flight);

        let expectation = lock(&self.state.expectations).remove(&kind);
        let Some(expectation) = expectation else {
            lock(&self.state.unexpected).push(kind);
            return Err(FetchError::new(
                kind,
                FetchCause::Status {
                    status: 501,
                    body: "no expectation set".to_string(),
                },
            ));
        };

        if !expectation.delay.is_zero() {
            tokio::time::sleep(expectation.delay).await;
        }

        let result = match expectation.behavior {
            Behavior::Respond(result) => result.map_err(|cause| FetchError::new(kind, cause)),
            Behavior::Hang => std::future::pending().await,
        };
        self.state.completed.fetch_add(1, Ordering::SeqCst);
        result
    }
}

/// Builder for a single kind's expectation.
pub struct ExpectationBuilder {
    kind: ResourceKind,
    delay: Duration,
    state: Arc<MockState>,
}

impl ExpectationBuilder {
    /// Answers only after `delay` has elapsed.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Answers with the given payload.
    pub fn return_ok(self, payload: ResourcePayload) {
        self.set(Behavior::Respond(Ok(payload)));
    }

    /// Answers with the given failure.
    pub fn return_err(self, cause: FetchCause) {
        self.set(Behavior::Respond(Err(cause)));
    }

    /// Never answers.
    pub fn hang(self) {
        self.set(Behavior::Hang);
    }

    fn set(self, behavior: Behavior) {
        lock(&self.state.expectations).insert(
            self.kind,
            Expectation {
                delay: self.delay,
                behavior,
            },
        );
    }
}
