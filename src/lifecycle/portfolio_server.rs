use crate::config::Config;
use crate::server::{self, Database, StoreActor, StoreError};
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to bind {addr}: {error}")]
    Bind { addr: SocketAddr, error: std::io::Error },

    #[error("Task failed: {0}")]
    TaskFailed(String),
}

/// The running API: the store actor plus the HTTP server in front of it.
///
/// # Example
///
/// ```ignore
/// let server = PortfolioServer::start(Database::open_in_memory()?, "127.0.0.1:0".parse()?).await?;
/// let client = ApiClient::new(server.api_url(), ApiClient::DEFAULT_TIMEOUT)?;
/// // ...
/// server.shutdown().await?;
/// ```
pub struct PortfolioServer {
    local_addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    server_handle: JoinHandle<()>,
    store_handle: JoinHandle<()>,
}

impl PortfolioServer {
    /// Spawns the store actor over `db`, binds `addr` and starts serving.
    ///
    /// Binding port 0 picks a free port; see [`PortfolioServer::local_addr`].
    pub async fn start(db: Database, addr: SocketAddr) -> Result<Self, LifecycleError> {
        // 1. Store actor owns the connection
        let (store_actor, store_client) = StoreActor::new(64);
        let store_handle = store_actor.spawn(db);

        // 2. Router holds the only store client
        let app = server::router(store_client);

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|error| LifecycleError::Bind { addr, error })?;
        let local_addr = listener
            .local_addr()
            .map_err(|error| LifecycleError::Bind { addr, error })?;
        info!(%local_addr, "Server running");

        // 3. Serve until told to stop
        let (shutdown, stop) = oneshot::channel::<()>();
        let server_handle = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = stop.await;
                })
                .await;
            if let Err(e) = result {
                error!(error = %e, "Server error");
            }
        });

        Ok(Self {
            local_addr,
            shutdown,
            server_handle,
            store_handle,
        })
    }

    /// Opens the configured database and serves on `0.0.0.0:{port}`.
    pub async fn start_with_config(config: &Config) -> Result<Self, LifecycleError> {
        info!(path = %config.database_path.display(), "Opening database");
        let db = Database::open(&config.database_path)?;
        Self::start(db, SocketAddr::from(([0, 0, 0, 0], config.port))).await
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Base URL a client should use to reach this server's API.
    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.local_addr)
    }

    /// Serves until Ctrl+C or SIGTERM, then shuts down.
    pub async fn run_until_signal(self) -> Result<(), LifecycleError> {
        server::shutdown_signal().await;
        self.shutdown().await
    }

    /// Stops accepting requests, lets in-flight ones finish, then stops the store.
    ///
    /// The server task drops the router, and with it the last store client, so the
    /// store actor exits on its own once the server has.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down server...");
        let _ = self.shutdown.send(());

        for (name, handle) in [("server", self.server_handle), ("store", self.store_handle)] {
            if let Err(e) = handle.await {
                error!(task = name, error = %e, "Task failed");
                return Err(LifecycleError::TaskFailed(format!("{name}: {e}")));
            }
        }

        info!("Server shutdown complete.");
        Ok(())
    }
}
