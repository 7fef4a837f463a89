use super::{AppError, StoreClient};
use crate::resource::ResourceKind;
use axum::Json;
use serde_json::Value;

/// Liveness line for `GET /`.
pub async fn root_handler() -> &'static str {
    "Portfolio API is running!"
}

/// Serves one resource kind from the store.
pub async fn resource_handler(store: StoreClient, kind: ResourceKind) -> Result<Json<Value>, AppError> {
    let payload = store
        .fetch(kind)
        .await
        .map_err(|e| AppError::fetch(kind, e))?
        .ok_or(AppError::NotFound("Profile"))?;

    let body = payload.to_json().map_err(|e| AppError::fetch(kind, e))?;
    Ok(Json(body))
}
