//! # Serving Layer
//!
//! Read-only HTTP API over the SQLite store, one `GET` route per resource kind.
//! Route paths are built from [`ResourceKind::path`], the same mapping the client
//! uses.
//!
//! | Route | Body |
//! |---|---|
//! | `GET /` | `Portfolio API is running!` |
//! | `GET /api/profile` | latest profile, or 404 `{"message":"Profile not found"}` |
//! | `GET /api/{projects,experiences,education,technologies}` | ordered array |
//!
//! Store failures answer 500 `{"message":"Error fetching <kind>","error":"..."}`.

pub mod error;
pub mod routes;
pub mod store;

pub use error::*;
pub use store::*;

use crate::resource::ResourceKind;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use std::time::Duration;
use tokio::signal::ctrl_c;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// Builds the application router over `store`.
pub fn router(store: StoreClient) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let api = ResourceKind::ALL.into_iter().fold(Router::<StoreClient>::new(), |api, kind| {
        api.route(
            kind.path(),
            get(move |State(store): State<StoreClient>| routes::resource_handler(store, kind)),
        )
    });

    Router::new()
        .route("/", get(routes::root_handler))
        .nest("/api", api)
        .layer(cors)
        .with_state(store)
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
