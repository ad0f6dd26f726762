//! Item Repository

use super::{RepoError, RepoResult};
use shared::models::{Item, ItemCreate, ItemUpdate};
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Item>> {
    let items = sqlx::query_as::<_, Item>(
        "SELECT id, nombre, precio, existencia, grupo_codigo, is_active FROM items ORDER BY nombre",
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Items that can go on a comanda right now: active and with stock
pub async fn find_sellable(pool: &SqlitePool) -> RepoResult<Vec<Item>> {
    let items = sqlx::query_as::<_, Item>(
        "SELECT id, nombre, precio, existencia, grupo_codigo, is_active FROM items \
         WHERE is_active = 1 AND existencia > 0 ORDER BY nombre",
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Item>> {
    let item = sqlx::query_as::<_, Item>(
        "SELECT id, nombre, precio, existencia, grupo_codigo, is_active FROM items WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

pub async fn create(pool: &SqlitePool, data: ItemCreate) -> RepoResult<Item> {
    if data.nombre.trim().is_empty() {
        return Err(RepoError::Validation("Item nombre must not be empty".into()));
    }
    let existencia = data.existencia.unwrap_or(0);
    if existencia < 0 {
        return Err(RepoError::Validation("existencia must be >= 0".into()));
    }
    grupo_must_exist(pool, &data.grupo_codigo).await?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO items (nombre, precio, existencia, grupo_codigo, is_active) \
         VALUES (?, ?, ?, ?, 1) RETURNING id",
    )
    .bind(&data.nombre)
    .bind(data.precio)
    .bind(existencia)
    .bind(&data.grupo_codigo)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create item".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ItemUpdate) -> RepoResult<Item> {
    if let Some(existencia) = data.existencia
        && existencia < 0
    {
        return Err(RepoError::Validation("existencia must be >= 0".into()));
    }
    if let Some(grupo_codigo) = &data.grupo_codigo {
        grupo_must_exist(pool, grupo_codigo).await?;
    }

    let rows = sqlx::query(
        "UPDATE items SET nombre = COALESCE(?1, nombre), precio = COALESCE(?2, precio), \
         existencia = COALESCE(?3, existencia), grupo_codigo = COALESCE(?4, grupo_codigo), \
         is_active = COALESCE(?5, is_active) WHERE id = ?6",
    )
    .bind(&data.nombre)
    .bind(data.precio)
    .bind(data.existencia)
    .bind(&data.grupo_codigo)
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Item {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    // Comanda lines referencing the item block the delete
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comanda_detalles WHERE item_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Err(RepoError::InUse(format!(
            "Item {id} is referenced by existing comandas"
        )));
    }
    let rows = sqlx::query("DELETE FROM items WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Item {id} not found")));
    }
    Ok(true)
}

async fn grupo_must_exist(pool: &SqlitePool, grupo_codigo: &str) -> RepoResult<()> {
    let found: Option<String> = sqlx::query_scalar("SELECT codigo FROM grupos WHERE codigo = ?")
        .bind(grupo_codigo)
        .fetch_optional(pool)
        .await?;
    if found.is_none() {
        return Err(RepoError::Validation(format!(
            "Grupo {grupo_codigo} does not exist"
        )));
    }
    Ok(())
}
