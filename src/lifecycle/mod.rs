//! Process-level wiring: tracing setup and the server's start/shutdown sequence.

pub mod portfolio_server;
pub mod tracing;

pub use portfolio_server::*;
pub use self::tracing::setup_tracing;
