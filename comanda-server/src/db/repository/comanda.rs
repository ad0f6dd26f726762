//! Comanda Repository
//!
//! Read-side queries only. Every comanda mutation (open, add line,
//! finalize) runs inside one transaction owned by
//! [`crate::orders::ComandaEngine`].

use super::RepoResult;
use shared::models::{Comanda, ComandaDetalle, ComandaLinea, ComandaResumen};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Comanda>> {
    let comanda = sqlx::query_as::<_, Comanda>(
        "SELECT id, mesa_id, usuario_id, estatus, total, fecha FROM comandas WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(comanda)
}

/// The open comanda for a mesa, if any (at most one by the partial unique index)
pub async fn find_pendiente_by_mesa(pool: &SqlitePool, mesa_id: i64) -> RepoResult<Option<Comanda>> {
    let comanda = sqlx::query_as::<_, Comanda>(
        "SELECT id, mesa_id, usuario_id, estatus, total, fecha FROM comandas \
         WHERE mesa_id = ? AND estatus = 'pendiente'",
    )
    .bind(mesa_id)
    .fetch_optional(pool)
    .await?;
    Ok(comanda)
}

/// Raw line rows for one comanda, in insertion order
pub async fn find_detalles(pool: &SqlitePool, comanda_id: i64) -> RepoResult<Vec<ComandaDetalle>> {
    let detalles = sqlx::query_as::<_, ComandaDetalle>(
        "SELECT id, comanda_id, item_id, cantidad, precio_unitario, total \
         FROM comanda_detalles WHERE comanda_id = ? ORDER BY id",
    )
    .bind(comanda_id)
    .fetch_all(pool)
    .await?;
    Ok(detalles)
}

/// Line projection with item names, for the mesa order view
pub async fn find_lineas(pool: &SqlitePool, comanda_id: i64) -> RepoResult<Vec<ComandaLinea>> {
    let lineas = sqlx::query_as::<_, ComandaLinea>(
        "SELECT cd.item_id, i.nombre, cd.cantidad, cd.precio_unitario, cd.total \
         FROM comanda_detalles cd \
         JOIN items i ON i.id = cd.item_id \
         WHERE cd.comanda_id = ? ORDER BY cd.id",
    )
    .bind(comanda_id)
    .fetch_all(pool)
    .await?;
    Ok(lineas)
}

/// All comandas newest-first with mesa and usuario names joined in
pub async fn find_all_resumen(pool: &SqlitePool) -> RepoResult<Vec<ComandaResumen>> {
    let resumen = sqlx::query_as::<_, ComandaResumen>(
        "SELECT c.id, c.mesa_id, m.nombre AS mesa_nombre, \
         c.usuario_id, u.display_name AS usuario_nombre, \
         c.estatus, c.total, c.fecha \
         FROM comandas c \
         JOIN mesas m ON m.id = c.mesa_id \
         JOIN usuarios u ON u.id = c.usuario_id \
         ORDER BY c.fecha DESC, c.id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(resumen)
}
