//! Sales report route
//!
//! # Routes
//!
//! | Path | Method | Description | Auth |
//! |------|--------|-------------|------|
//! | /manager/ventas-item | GET | sales grouped by item | admin |

use axum::{
    Json, Router, middleware,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::auth::require_admin;
use crate::core::ServerState;
use crate::db::repository;
use shared::models::VentaItem;
use shared::{AppError, AppResult, ErrorCode};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/manager/ventas-item", get(ventas_item))
        .layer(middleware::from_fn(require_admin))
}

#[derive(Debug, Deserialize)]
pub struct VentasQuery {
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
    pub item_id: Option<i64>,
}

/// GET /manager/ventas-item - SUM(cantidad) and SUM(total) per item
///
/// Any subset of the filters may be present; dates are `YYYY-MM-DD` and
/// `fecha_fin` is inclusive through end of day.
pub async fn ventas_item(
    State(state): State<ServerState>,
    Query(query): Query<VentasQuery>,
) -> AppResult<Json<Vec<VentaItem>>> {
    if let Some(fecha) = &query.fecha_inicio {
        validate_fecha(fecha)?;
    }
    if let Some(fecha) = &query.fecha_fin {
        validate_fecha(fecha)?;
    }

    let ventas = repository::venta::por_item(
        state.pool(),
        query.fecha_inicio.as_deref(),
        query.fecha_fin.as_deref(),
        query.item_id,
    )
    .await?;
    Ok(Json(ventas))
}

fn validate_fecha(fecha: &str) -> Result<(), AppError> {
    chrono::NaiveDate::parse_from_str(fecha, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| {
            AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("Invalid date: {fecha} (expected YYYY-MM-DD)"),
            )
        })
}
