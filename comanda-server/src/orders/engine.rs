//! Comanda Engine
//!
//! All mutating operations take the per-mesa lock, then run inside one
//! SQLite transaction: line upsert, total recompute and status flip commit
//! or roll back together. The partial unique index on
//! `comandas(mesa_id) WHERE estatus = 'pendiente'` backstops the
//! one-open-comanda-per-mesa invariant at the storage level.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tokio::sync::Mutex;

use crate::db::repository;
use shared::models::{Comanda, MesaComandaView};
use shared::{AppError, AppResult, ErrorCode};

#[derive(Debug)]
pub struct ComandaEngine {
    pool: SqlitePool,
    mesa_locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl ComandaEngine {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            mesa_locks: DashMap::new(),
        }
    }

    /// The async mutex serializing mutations for one mesa
    fn lock_for(&self, mesa_id: i64) -> Arc<Mutex<()>> {
        self.mesa_locks
            .entry(mesa_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Reuse the pending comanda for the mesa or open a fresh one
    pub async fn open_or_get(&self, mesa_id: i64, usuario_id: i64) -> AppResult<Comanda> {
        let lock = self.lock_for(mesa_id);
        let _guard = lock.lock().await;

        self.mesa_must_exist(mesa_id).await?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        let comanda_id = open_or_get_tx(&mut tx, mesa_id, usuario_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        let comanda = fetch_comanda_tx(&mut tx, comanda_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        tx.commit()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok(comanda)
    }

    /// Add `cantidad` units of an item to the mesa's pending comanda.
    ///
    /// Repeated additions of the same item fold into one line: the quantity
    /// grows and the line total is recomputed from the stored
    /// `precio_unitario`, not from the current catalog price. The comanda
    /// total is then rewritten as the SUM over all lines.
    pub async fn add_item(
        &self,
        mesa_id: i64,
        item_id: i64,
        usuario_id: i64,
        cantidad: i64,
    ) -> AppResult<Comanda> {
        if cantidad < 1 {
            return Err(AppError::validation("cantidad must be >= 1"));
        }

        let lock = self.lock_for(mesa_id);
        let _guard = lock.lock().await;

        self.mesa_must_exist(mesa_id).await?;

        // Reject unsellable items before touching storage
        let item = repository::item::find_by_id(&self.pool, item_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::ItemNotFound))?;
        if !item.is_active {
            return Err(AppError::new(ErrorCode::ItemInactive));
        }
        if item.existencia <= 0 {
            return Err(AppError::new(ErrorCode::ItemOutOfStock));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let comanda_id = open_or_get_tx(&mut tx, mesa_id, usuario_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let existing: Option<(i64, i64, i64)> = sqlx::query_as(
            "SELECT id, cantidad, precio_unitario FROM comanda_detalles \
             WHERE comanda_id = ? AND item_id = ?",
        )
        .bind(comanda_id)
        .bind(item_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

        match existing {
            Some((detalle_id, cantidad_actual, precio_unitario)) => {
                let nueva_cantidad = cantidad_actual
                    .checked_add(cantidad)
                    .ok_or_else(|| AppError::new(ErrorCode::ValueOutOfRange))?;
                let line_total = nueva_cantidad
                    .checked_mul(precio_unitario)
                    .ok_or_else(|| AppError::new(ErrorCode::ValueOutOfRange))?;
                sqlx::query("UPDATE comanda_detalles SET cantidad = ?, total = ? WHERE id = ?")
                    .bind(nueva_cantidad)
                    .bind(line_total)
                    .bind(detalle_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| AppError::database(e.to_string()))?;
            }
            None => {
                let line_total = cantidad
                    .checked_mul(item.precio)
                    .ok_or_else(|| AppError::new(ErrorCode::ValueOutOfRange))?;
                sqlx::query(
                    "INSERT INTO comanda_detalles \
                     (comanda_id, item_id, cantidad, precio_unitario, total) \
                     VALUES (?, ?, ?, ?, ?)",
                )
                .bind(comanda_id)
                .bind(item_id)
                .bind(cantidad)
                .bind(item.precio)
                .bind(line_total)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(e.to_string()))?;
            }
        }

        // Never patch the total incrementally; recompute the exact SUM
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total), 0) FROM comanda_detalles WHERE comanda_id = ?",
        )
        .bind(comanda_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

        sqlx::query("UPDATE comandas SET total = ? WHERE id = ?")
            .bind(total)
            .bind(comanda_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let comanda = fetch_comanda_tx(&mut tx, comanda_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        tracing::info!(
            comanda_id,
            mesa_id,
            item_id,
            usuario_id,
            cantidad,
            total,
            "Item added to comanda"
        );

        Ok(comanda)
    }

    /// Close the mesa's pending comanda (`pendiente` -> `pagada`).
    ///
    /// The mesa reads `libre` from that moment on; there is no second
    /// write that could drift. An empty pending comanda may be finalized.
    pub async fn finalize(&self, mesa_id: i64, usuario_id: i64) -> AppResult<Comanda> {
        let lock = self.lock_for(mesa_id);
        let _guard = lock.lock().await;

        self.mesa_must_exist(mesa_id).await?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let comanda_id: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM comandas WHERE mesa_id = ? AND estatus = 'pendiente'",
        )
        .bind(mesa_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

        let comanda_id = comanda_id.ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

        sqlx::query("UPDATE comandas SET estatus = 'pagada' WHERE id = ?")
            .bind(comanda_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let comanda = fetch_comanda_tx(&mut tx, comanda_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        tracing::info!(
            comanda_id,
            mesa_id,
            usuario_id,
            total = comanda.total,
            "Comanda finalized"
        );

        Ok(comanda)
    }

    /// Project the current order for one mesa.
    ///
    /// A free mesa is not an error: the view carries an empty line list,
    /// a zero total and no comanda id.
    pub async fn mesa_view(&self, mesa_id: i64) -> AppResult<MesaComandaView> {
        let mesa = repository::mesa::find_by_id(&self.pool, mesa_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;

        match repository::comanda::find_pendiente_by_mesa(&self.pool, mesa_id).await? {
            Some(comanda) => {
                let items = repository::comanda::find_lineas(&self.pool, comanda.id).await?;
                Ok(MesaComandaView {
                    mesa,
                    items,
                    total: comanda.total,
                    comanda_id: Some(comanda.id),
                })
            }
            None => Ok(MesaComandaView {
                mesa,
                items: Vec::new(),
                total: 0,
                comanda_id: None,
            }),
        }
    }

    async fn mesa_must_exist(&self, mesa_id: i64) -> AppResult<()> {
        repository::mesa::find_by_id(&self.pool, mesa_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;
        Ok(())
    }
}

async fn open_or_get_tx(
    tx: &mut Transaction<'_, Sqlite>,
    mesa_id: i64,
    usuario_id: i64,
) -> Result<i64, sqlx::Error> {
    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM comandas WHERE mesa_id = ? AND estatus = 'pendiente'")
            .bind(mesa_id)
            .fetch_optional(&mut **tx)
            .await?;
    if let Some(id) = existing {
        return Ok(id);
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO comandas (mesa_id, usuario_id, estatus, total, fecha) \
         VALUES (?, ?, 'pendiente', 0, ?) RETURNING id",
    )
    .bind(mesa_id)
    .bind(usuario_id)
    .bind(Utc::now())
    .fetch_one(&mut **tx)
    .await?;

    tracing::info!(comanda_id = id, mesa_id, usuario_id, "Comanda opened");
    Ok(id)
}

async fn fetch_comanda_tx(
    tx: &mut Transaction<'_, Sqlite>,
    comanda_id: i64,
) -> Result<Comanda, sqlx::Error> {
    sqlx::query_as::<_, Comanda>(
        "SELECT id, mesa_id, usuario_id, estatus, total, fecha FROM comandas WHERE id = ?",
    )
    .bind(comanda_id)
    .fetch_one(&mut **tx)
    .await
}
