//! Sales Report Queries

use super::RepoResult;
use shared::models::VentaItem;
use sqlx::SqlitePool;

/// Sales grouped by item, best seller first.
///
/// Dates are `YYYY-MM-DD`; `fecha_fin` is inclusive through the end of the
/// day because the comparison happens on `date(fecha)`. Each filter is
/// optional and the query collapses around the NULL binds.
pub async fn por_item(
    pool: &SqlitePool,
    fecha_inicio: Option<&str>,
    fecha_fin: Option<&str>,
    item_id: Option<i64>,
) -> RepoResult<Vec<VentaItem>> {
    let ventas = sqlx::query_as::<_, VentaItem>(
        "SELECT cd.item_id, i.nombre, \
         SUM(cd.cantidad) AS cantidad, SUM(cd.total) AS total \
         FROM comanda_detalles cd \
         JOIN items i ON i.id = cd.item_id \
         JOIN comandas c ON c.id = cd.comanda_id \
         WHERE (?1 IS NULL OR date(c.fecha) >= ?1) \
           AND (?2 IS NULL OR date(c.fecha) <= ?2) \
           AND (?3 IS NULL OR cd.item_id = ?3) \
         GROUP BY cd.item_id, i.nombre \
         ORDER BY total DESC",
    )
    .bind(fecha_inicio)
    .bind(fecha_fin)
    .bind(item_id)
    .fetch_all(pool)
    .await?;
    Ok(ventas)
}
