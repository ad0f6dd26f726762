//! Mesa API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{self, RepoError};
use shared::models::{Mesa, MesaCreate, MesaEstado, MesaUpdate};
use shared::{AppError, AppResult, ErrorCode};

/// GET /manager/mesas - all mesas with derived occupancy status
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MesaEstado>>> {
    let mesas = repository::mesa::find_all_con_estado(state.pool()).await?;
    Ok(Json(mesas))
}

/// GET /manager/mesas/:id - single mesa
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Mesa>> {
    let mesa = repository::mesa::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;
    Ok(Json(mesa))
}

/// POST /manager/mesas - create mesa
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MesaCreate>,
) -> AppResult<Json<Mesa>> {
    let mesa = repository::mesa::create(state.pool(), payload).await?;
    Ok(Json(mesa))
}

/// PUT /manager/mesas/:id - update mesa
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MesaUpdate>,
) -> AppResult<Json<Mesa>> {
    let mesa = repository::mesa::update(state.pool(), id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::TableNotFound),
            other => other.into(),
        })?;
    Ok(Json(mesa))
}

/// DELETE /manager/mesas/:id - delete mesa
///
/// Rejected while comandas (pending or paid) reference the mesa.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = repository::mesa::delete(state.pool(), id)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::TableNotFound),
            RepoError::InUse(msg) => AppError::with_message(ErrorCode::TableHasOrders, msg),
            other => other.into(),
        })?;
    Ok(Json(result))
}
