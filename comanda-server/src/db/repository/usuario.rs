//! Usuario Repository
//!
//! Password hashing happens in `crate::auth::password`; this module only
//! ever sees the finished argon2 hash.

use super::{RepoError, RepoResult};
use shared::models::{Usuario, UsuarioCreate, UsuarioUpdate};
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Usuario>> {
    let usuarios = sqlx::query_as::<_, Usuario>(
        "SELECT id, username, hash_pass, display_name, role, is_active FROM usuarios \
         ORDER BY username",
    )
    .fetch_all(pool)
    .await?;
    Ok(usuarios)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Usuario>> {
    let usuario = sqlx::query_as::<_, Usuario>(
        "SELECT id, username, hash_pass, display_name, role, is_active FROM usuarios WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(usuario)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<Usuario>> {
    let usuario = sqlx::query_as::<_, Usuario>(
        "SELECT id, username, hash_pass, display_name, role, is_active FROM usuarios \
         WHERE username = ? LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(usuario)
}

pub async fn create(pool: &SqlitePool, data: UsuarioCreate, hash_pass: String) -> RepoResult<Usuario> {
    if data.username.trim().is_empty() {
        return Err(RepoError::Validation("username must not be empty".into()));
    }
    if find_by_username(pool, &data.username).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Username {} already exists",
            data.username
        )));
    }
    let display_name = data.display_name.unwrap_or_else(|| data.username.clone());

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO usuarios (username, hash_pass, display_name, role, is_active) \
         VALUES (?, ?, ?, ?, 1) RETURNING id",
    )
    .bind(&data.username)
    .bind(&hash_pass)
    .bind(&display_name)
    .bind(data.role)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create usuario".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: UsuarioUpdate,
    hash_pass: Option<String>,
) -> RepoResult<Usuario> {
    let rows = sqlx::query(
        "UPDATE usuarios SET username = COALESCE(?1, username), \
         hash_pass = COALESCE(?2, hash_pass), display_name = COALESCE(?3, display_name), \
         role = COALESCE(?4, role), is_active = COALESCE(?5, is_active) WHERE id = ?6",
    )
    .bind(&data.username)
    .bind(&hash_pass)
    .bind(&data.display_name)
    .bind(data.role)
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Usuario {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Usuario {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    // Comandas keep their owner on record; block the delete while any exist
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comandas WHERE usuario_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Err(RepoError::InUse(format!(
            "Usuario {id} owns {count} comandas on record"
        )));
    }
    let rows = sqlx::query("DELETE FROM usuarios WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Usuario {id} not found")));
    }
    Ok(true)
}
