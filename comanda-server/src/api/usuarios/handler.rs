//! Usuario API Handlers
//!
//! Passwords are hashed here before anything reaches the repository;
//! responses use [`UsuarioResponse`], which never carries the hash.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::auth::{CurrentUser, password};
use crate::core::ServerState;
use crate::db::repository::{self, RepoError};
use shared::models::{UsuarioCreate, UsuarioResponse, UsuarioUpdate};
use shared::{AppError, AppResult, ErrorCode};

/// GET /api/usuarios - all users
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<UsuarioResponse>>> {
    let usuarios = repository::usuario::find_all(state.pool()).await?;
    Ok(Json(
        usuarios.into_iter().map(UsuarioResponse::from).collect(),
    ))
}

/// GET /api/usuarios/:id - single user
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UsuarioResponse>> {
    let usuario = repository::usuario::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(UsuarioResponse::from(usuario)))
}

/// POST /api/usuarios - create user
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UsuarioCreate>,
) -> AppResult<Json<UsuarioResponse>> {
    if payload.password.is_empty() {
        return Err(AppError::validation("password must not be empty"));
    }
    let hash = password::hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let usuario = repository::usuario::create(state.pool(), payload, hash)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::UsernameExists, msg),
            other => other.into(),
        })?;
    Ok(Json(UsuarioResponse::from(usuario)))
}

/// PUT /api/usuarios/:id - update user
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UsuarioUpdate>,
) -> AppResult<Json<UsuarioResponse>> {
    let hash = match payload.password.as_deref() {
        Some("") => return Err(AppError::validation("password must not be empty")),
        Some(p) => Some(
            password::hash_password(p)
                .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?,
        ),
        None => None,
    };

    let usuario = repository::usuario::update(state.pool(), id, payload, hash)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::UserNotFound),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::UsernameExists, msg),
            other => other.into(),
        })?;
    Ok(Json(UsuarioResponse::from(usuario)))
}

/// DELETE /api/usuarios/:id - delete user
///
/// Self-deletion is rejected; so is deleting a user who owns comandas
/// (deactivate the account instead).
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    if user.id == id {
        return Err(AppError::new(ErrorCode::CannotDeleteSelf));
    }

    let result = repository::usuario::delete(state.pool(), id)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::UserNotFound),
            RepoError::InUse(msg) => AppError::conflict(msg),
            other => other.into(),
        })?;
    Ok(Json(result))
}
