//! # ResourceFetcher Trait
//!
//! The dependency the load coordinator is injected with. Anything that can turn a
//! [`ResourceKind`] into a [`ResourcePayload`] qualifies: the HTTP [`ApiClient`](super::ApiClient)
//! in production, [`MockFetcher`](super::mock::MockFetcher) in tests.
//!
//! Implementations must be safe to call concurrently for different kinds and keep
//! no mutable state shared between calls.

use super::FetchError;
use crate::resource::{ResourceKind, ResourcePayload};
use async_trait::async_trait;

/// Reads one resource kind.
#[async_trait]
pub trait ResourceFetcher: Send + Sync + 'static {
    /// Performs exactly one read for `kind`. Never retries.
    async fn fetch_kind(&self, kind: ResourceKind) -> Result<ResourcePayload, FetchError>;
}
