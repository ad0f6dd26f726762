//! Grupo Repository

use super::{RepoError, RepoResult};
use shared::models::{Grupo, GrupoCreate, GrupoUpdate};
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Grupo>> {
    let grupos = sqlx::query_as::<_, Grupo>("SELECT codigo, nombre FROM grupos ORDER BY nombre")
        .fetch_all(pool)
        .await?;
    Ok(grupos)
}

pub async fn find_by_codigo(pool: &SqlitePool, codigo: &str) -> RepoResult<Option<Grupo>> {
    let grupo = sqlx::query_as::<_, Grupo>("SELECT codigo, nombre FROM grupos WHERE codigo = ?")
        .bind(codigo)
        .fetch_optional(pool)
        .await?;
    Ok(grupo)
}

pub async fn create(pool: &SqlitePool, data: GrupoCreate) -> RepoResult<Grupo> {
    if data.codigo.trim().is_empty() {
        return Err(RepoError::Validation("Grupo codigo must not be empty".into()));
    }
    if data.nombre.trim().is_empty() {
        return Err(RepoError::Validation("Grupo nombre must not be empty".into()));
    }
    if find_by_codigo(pool, &data.codigo).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Grupo {} already exists",
            data.codigo
        )));
    }
    sqlx::query("INSERT INTO grupos (codigo, nombre) VALUES (?, ?)")
        .bind(&data.codigo)
        .bind(&data.nombre)
        .execute(pool)
        .await?;
    find_by_codigo(pool, &data.codigo)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create grupo".into()))
}

pub async fn update(pool: &SqlitePool, codigo: &str, data: GrupoUpdate) -> RepoResult<Grupo> {
    let rows = sqlx::query("UPDATE grupos SET nombre = COALESCE(?1, nombre) WHERE codigo = ?2")
        .bind(&data.nombre)
        .bind(codigo)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Grupo {codigo} not found")));
    }
    find_by_codigo(pool, codigo)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Grupo {codigo} not found")))
}

pub async fn delete(pool: &SqlitePool, codigo: &str) -> RepoResult<bool> {
    // Items still referencing the grupo block the delete
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE grupo_codigo = ?")
        .bind(codigo)
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Err(RepoError::InUse(format!(
            "Grupo {codigo} still has {count} items"
        )));
    }
    let rows = sqlx::query("DELETE FROM grupos WHERE codigo = ?")
        .bind(codigo)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Grupo {codigo} not found")));
    }
    Ok(true)
}
