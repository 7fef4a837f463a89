//! Error types for the data-access layer.

use crate::resource::ResourceKind;
use thiserror::Error;

/// A failed read of one resource kind.
///
/// Transport errors, timeouts, decode errors and non-success statuses are all
/// reported as this one type. The [`FetchCause`] is kept for logging and is
/// already part of the message, so it is not exposed as a `source`.
#[derive(Debug, Error)]
#[error("Failed to fetch {kind}: {cause}")]
pub struct FetchError {
    pub kind: ResourceKind,
    pub cause: FetchCause,
}

impl FetchError {
    pub fn new(kind: ResourceKind, cause: FetchCause) -> Self {
        Self { kind, cause }
    }

    /// The HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match &self.cause {
            FetchCause::NotFound => Some(404),
            FetchCause::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this is the singleton profile being absent, a valid terminal state.
    pub fn is_absent_profile(&self) -> bool {
        self.kind == ResourceKind::Profile && matches!(self.cause, FetchCause::NotFound)
    }
}

/// An [`ApiClient`](super::ApiClient) could not be constructed.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("Invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Http(reqwest::Error),
}

impl From<reqwest::Error> for ClientBuildError {
    fn from(e: reqwest::Error) -> Self {
        ClientBuildError::Http(e)
    }
}

/// Why a fetch failed.
#[derive(Debug, Error)]
pub enum FetchCause {
    /// The request did not complete within the client timeout.
    #[error("Request timed out")]
    Timeout,

    /// The server could not be reached or the connection broke.
    #[error("Transport error: {0}")]
    Transport(reqwest::Error),

    /// The server answered 404.
    #[error("Not found")]
    NotFound,

    /// The server answered with any other non-2xx status.
    #[error("Server error: HTTP {status} - {body}")]
    Status { status: u16, body: String },

    /// The body was not the JSON shape expected for the kind.
    #[error("Decode error: {0}")]
    Decode(serde_json::Error),

    /// The fetch task ended (panicked or was cancelled) before producing a result.
    #[error("Fetch ended without a result")]
    Interrupted,
}

impl From<reqwest::Error> for FetchCause {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchCause::Timeout
        } else {
            FetchCause::Transport(e)
        }
    }
}

impl From<serde_json::Error> for FetchCause {
    fn from(e: serde_json::Error) -> Self {
        FetchCause::Decode(e)
    }
}
