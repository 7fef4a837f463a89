//! # folio
//!
//! > **A personal portfolio: read-only API, typed client and a load coordinator
//! > that gates rendering until every resource has settled.**
//!
//! The portfolio is built from five resources: a profile, projects, work
//! experience, education and technologies. The server answers each with one
//! ordered JSON document. The client fetches all five at once and renders nothing
//! until each has either arrived or failed.
//!
//! ## Architecture Notes
//!
//! ### 1. One Mapping, Two Views
//! [`ResourceKind`](resource::ResourceKind) is the closed set of resources. Its
//! endpoint path and decode function are fixed in one place and shared by the
//! client, the coordinator and the server routes. [`Resource`](resource::Resource)
//! marker types give the same mapping statically, so typed fetches need no
//! runtime check.
//!
//! ### 2. Failure Isolation
//! A failed fetch never blocks or cancels its siblings. It settles its slot as
//! empty and counts toward progress like a success. A missing profile is an
//! ordinary outcome, not an error to retry.
//!
//! ### 3. Actors Own State
//! The [`LoadCoordinator`](coordinator::LoadCoordinator) owns the settlement map
//! and the [`StoreActor`](server::StoreActor) owns the SQLite connection. Each
//! processes messages sequentially in its own task, so neither needs a lock.
//! Dependencies (the fetcher, the database) are injected when the actor starts.
//!
//! ### 4. Observability
//! `tracing` everywhere with structured fields. See [`lifecycle::tracing`].
//!
//! ## Module Tour
//!
//! - [`model`]: the five record types, camelCase on the wire.
//! - [`resource`]: resource kinds, payloads and the [`Resource`](resource::Resource) trait.
//! - [`client`]: [`ApiClient`](client::ApiClient) over `reqwest`, the
//!   [`ResourceFetcher`](client::ResourceFetcher) seam and its mock.
//! - [`coordinator`]: concurrent load with progress and one `ready` transition.
//! - [`render`]: plain-text presentation of loaded data.
//! - [`server`]: `axum` routes over the SQLite store.
//! - [`lifecycle`]: tracing setup and server start/shutdown.
//! - [`config`]: environment settings.
//!
//! ## Quick Start
//!
//! ```bash
//! # Serve the API from data/portfolio.sqlite on port 8000
//! RUST_LOG=info cargo run -- serve
//!
//! # Load and print the portfolio from a running API
//! RUST_LOG=info cargo run -- load --api-url http://localhost:8000/api
//! ```

pub mod client;
pub mod config;
pub mod coordinator;
pub mod lifecycle;
pub mod model;
pub mod render;
pub mod resource;
pub mod server;
