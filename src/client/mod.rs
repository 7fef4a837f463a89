//! # Data-Access Layer
//!
//! One typed accessor per resource kind, each performing exactly one `GET` and
//! returning the shape fixed by the kind (see [`crate::resource`]).
//!
//! - [`ApiClient`] talks HTTP through `reqwest` with a finite timeout.
//! - [`ResourceFetcher`] is the seam the load coordinator depends on; tests swap
//!   in [`mock::MockFetcher`].
//! - Every failure mode folds into a single [`FetchError`] carrying the kind and
//!   the cause. The cause is for logs; callers never branch on it.

pub mod api_client;
pub mod error;
pub mod fetcher;
pub mod mock;

pub use api_client::*;
pub use error::*;
pub use fetcher::*;
