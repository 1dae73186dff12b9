//! Request handlers translating HTTP calls into store operations.
//!
//! Handlers keep no state of their own; everything goes through the
//! injected `ResourceStore`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, RawQuery, State,
    },
    http::StatusCode,
    Json,
};
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::model::{Resource, ResourceId};
use crate::AppState;

/// GET /resources — every stored resource, `[]` when empty.
///
/// Query parameters are transported but do not filter.
pub async fn list_resources(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Json<Vec<Resource>> {
    let resources = state.store.list().await;
    debug!(count = resources.len(), query = query.as_deref(), "list resources");
    Json(resources)
}

/// POST /resources/create — upsert the resource named by the body's `id`.
pub async fn create_resource(
    State(state): State<AppState>,
    body: Result<Json<Resource>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(resource) = body.inspect_err(|e| warn!(error = %e, "rejected create body"))?;
    info!(id = resource.id, "create resource");
    state.store.put(resource).await;
    Ok(StatusCode::OK)
}

/// GET /resources/{id}
pub async fn get_resource(
    State(state): State<AppState>,
    path: Result<Path<ResourceId>, PathRejection>,
) -> Result<Json<Resource>, AppError> {
    let Path(id) = path?;
    debug!(id, "get resource");
    Ok(Json(state.store.get(id).await?))
}

/// PUT /resources/{id}
///
/// Body and identity problems answer 400 before the store is consulted, so
/// a mismatched id never shows up as 404.
pub async fn update_resource(
    State(state): State<AppState>,
    path: Result<Path<ResourceId>, PathRejection>,
    body: Result<Json<Resource>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    let Json(resource) = body.inspect_err(|e| warn!(id, error = %e, "rejected update body"))?;
    if resource.id != id {
        warn!(path_id = id, body_id = resource.id, "update id mismatch");
        return Err(AppError::BadRequest(format!(
            "body id {} does not match path id {id}",
            resource.id
        )));
    }
    state.store.update(id, resource).await?;
    info!(id, "updated resource");
    Ok(StatusCode::OK)
}

/// DELETE /resources/{id}
pub async fn delete_resource(
    State(state): State<AppState>,
    path: Result<Path<ResourceId>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    state.store.delete(id).await?;
    info!(id, "deleted resource");
    Ok(StatusCode::OK)
}
