//! Grupo API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{self, RepoError};
use shared::models::{Grupo, GrupoCreate, GrupoUpdate};
use shared::{AppError, AppResult, ErrorCode};

/// GET /manager/grupos - all grupos
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Grupo>>> {
    let grupos = repository::grupo::find_all(state.pool()).await?;
    Ok(Json(grupos))
}

/// GET /manager/grupos/:codigo - single grupo
pub async fn get_by_codigo(
    State(state): State<ServerState>,
    Path(codigo): Path<String>,
) -> AppResult<Json<Grupo>> {
    let grupo = repository::grupo::find_by_codigo(state.pool(), &codigo)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::GroupNotFound))?;
    Ok(Json(grupo))
}

/// POST /manager/grupos - create grupo
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<GrupoCreate>,
) -> AppResult<Json<Grupo>> {
    let grupo = repository::grupo::create(state.pool(), payload)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::GroupCodeExists, msg),
            other => other.into(),
        })?;
    Ok(Json(grupo))
}

/// PUT /manager/grupos/:codigo - update grupo
pub async fn update(
    State(state): State<ServerState>,
    Path(codigo): Path<String>,
    Json(payload): Json<GrupoUpdate>,
) -> AppResult<Json<Grupo>> {
    let grupo = repository::grupo::update(state.pool(), &codigo, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::GroupNotFound),
            other => other.into(),
        })?;
    Ok(Json(grupo))
}

/// DELETE /manager/grupos/:codigo - delete grupo
///
/// Rejected while items still reference the codigo.
pub async fn delete(
    State(state): State<ServerState>,
    Path(codigo): Path<String>,
) -> AppResult<Json<bool>> {
    let result = repository::grupo::delete(state.pool(), &codigo)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::GroupNotFound),
            RepoError::InUse(msg) => AppError::with_message(ErrorCode::GroupHasItems, msg),
            other => other.into(),
        })?;
    Ok(Json(result))
}
