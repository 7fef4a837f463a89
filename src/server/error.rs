//! Errors for the serving layer: storage failures and their HTTP mapping.

use crate::resource::ResourceKind;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;
use tracing::error;

/// A failed read from the store. Underlying errors are part of the message.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(rusqlite::Error),

    #[error("Failed to create database directory {}: {error}", path.display())]
    CreateDir { path: PathBuf, error: std::io::Error },

    #[error("Store closed")]
    ActorClosed,

    #[error("Store dropped response channel")]
    ActorDropped,
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e)
    }
}

/// What a handler answers with when it cannot return the resource.
#[derive(Debug, Error)]
pub enum AppError {
    /// The singleton has no row.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Error fetching {kind}")]
    Fetch { kind: ResourceKind, error: String },
}

impl AppError {
    pub fn fetch(kind: ResourceKind, error: impl ToString) -> Self {
        AppError::Fetch {
            kind,
            error: error.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            AppError::NotFound(_) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            AppError::Fetch { kind, error } => {
                error!(%kind, %error, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": message, "error": error })),
                )
                    .into_response()
            }
        }
    }
}
