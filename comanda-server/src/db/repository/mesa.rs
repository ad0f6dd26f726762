//! Mesa Repository
//!
//! A mesa has no stored occupancy column; `ocupada`/`libre` is derived
//! from the presence of a pending comanda at read time.

use super::{RepoError, RepoResult};
use shared::models::{Mesa, MesaCreate, MesaEstado, MesaUpdate};
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Mesa>> {
    let mesas = sqlx::query_as::<_, Mesa>("SELECT id, nombre FROM mesas ORDER BY nombre")
        .fetch_all(pool)
        .await?;
    Ok(mesas)
}

/// All mesas with their derived occupancy status
pub async fn find_all_con_estado(pool: &SqlitePool) -> RepoResult<Vec<MesaEstado>> {
    let mesas = sqlx::query_as::<_, MesaEstado>(
        "SELECT m.id, m.nombre, \
         CASE WHEN c.id IS NULL THEN 'libre' ELSE 'ocupada' END AS estatus \
         FROM mesas m \
         LEFT JOIN comandas c ON c.mesa_id = m.id AND c.estatus = 'pendiente' \
         ORDER BY m.nombre",
    )
    .fetch_all(pool)
    .await?;
    Ok(mesas)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Mesa>> {
    let mesa = sqlx::query_as::<_, Mesa>("SELECT id, nombre FROM mesas WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(mesa)
}

pub async fn create(pool: &SqlitePool, data: MesaCreate) -> RepoResult<Mesa> {
    if data.nombre.trim().is_empty() {
        return Err(RepoError::Validation("Mesa nombre must not be empty".into()));
    }
    let id: i64 = sqlx::query_scalar("INSERT INTO mesas (nombre) VALUES (?) RETURNING id")
        .bind(&data.nombre)
        .fetch_one(pool)
        .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create mesa".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: MesaUpdate) -> RepoResult<Mesa> {
    let rows = sqlx::query("UPDATE mesas SET nombre = COALESCE(?1, nombre) WHERE id = ?2")
        .bind(&data.nombre)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Mesa {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Mesa {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    // Comandas (open or paid) referencing the mesa block the delete
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comandas WHERE mesa_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Err(RepoError::InUse(format!(
            "Mesa {id} has {count} comandas on record"
        )));
    }
    let rows = sqlx::query("DELETE FROM mesas WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Mesa {id} not found")));
    }
    Ok(true)
}
