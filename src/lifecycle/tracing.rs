//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden; records carry structured fields instead:
//!
//! - `kind`: the resource kind a fetch, slot or route concerns
//! - `status` / `error`: why a fetch settled empty
//! - `settled` / `total`: coordinator progress
//!
//! ```bash
//! # Lifecycle and per-kind outcomes
//! RUST_LOG=info folio load
//!
//! # Every request, response status and progress step
//! RUST_LOG=debug folio load
//! ```
//!
//! A load where the profile is missing and one collection times out reads:
//!
//! ```text
//! INFO Load started total=5
//! INFO fetch: Response received kind=projects status=200
//! INFO Resolved kind=projects records=4
//! INFO No profile, settling empty kind=profile
//! WARN Fetch failed, settling empty kind=education status=None error=Failed to fetch education: Request timed out
//! INFO All resources settled total=5
//! ```

/// Installs the global subscriber. Later calls are no-ops, so tests may call it freely.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
