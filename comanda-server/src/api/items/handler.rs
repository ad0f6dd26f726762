//! Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{self, RepoError};
use shared::models::{Item, ItemCreate, ItemUpdate};
use shared::{AppError, AppResult, ErrorCode};

/// GET /api/items - all items, including inactive ones
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Item>>> {
    let items = repository::item::find_all(state.pool()).await?;
    Ok(Json(items))
}

/// GET /api/items/:id - single item
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Item>> {
    let item = repository::item::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ItemNotFound))?;
    Ok(Json(item))
}

/// POST /api/items - create item
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ItemCreate>,
) -> AppResult<Json<Item>> {
    let item = repository::item::create(state.pool(), payload).await?;
    Ok(Json(item))
}

/// PUT /api/items/:id - update item
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ItemUpdate>,
) -> AppResult<Json<Item>> {
    let item = repository::item::update(state.pool(), id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::ItemNotFound),
            other => other.into(),
        })?;
    Ok(Json(item))
}

/// DELETE /api/items/:id - delete item
///
/// Rejected while comanda lines reference the item; deactivate it instead.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = repository::item::delete(state.pool(), id)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::ItemNotFound),
            RepoError::InUse(msg) => AppError::with_message(ErrorCode::ItemInUse, msg),
            other => other.into(),
        })?;
    Ok(Json(result))
}
