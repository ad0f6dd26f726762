//! Comanda API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository;
use shared::AppResult;
use shared::models::{Comanda, ComandaResumen, Grupo, Item, MesaComandaView, MesaEstado};

/// Everything the order-taking screen needs in one round trip
#[derive(Debug, Serialize)]
pub struct OrderScreenData {
    /// Active items with stock
    pub items: Vec<Item>,
    pub grupos: Vec<Grupo>,
    /// All mesas with derived occupancy status
    pub mesas: Vec<MesaEstado>,
}

fn default_cantidad() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct AgregarItemRequest {
    pub mesa_id: i64,
    pub item_id: i64,
    #[serde(default = "default_cantidad")]
    pub cantidad: i64,
}

#[derive(Debug, Serialize)]
pub struct AgregarItemResponse {
    pub success: bool,
}

/// GET /comandas - order screen data
pub async fn order_screen(State(state): State<ServerState>) -> AppResult<Json<OrderScreenData>> {
    let items = repository::item::find_sellable(state.pool()).await?;
    let grupos = repository::grupo::find_all(state.pool()).await?;
    let mesas = repository::mesa::find_all_con_estado(state.pool()).await?;

    Ok(Json(OrderScreenData {
        items,
        grupos,
        mesas,
    }))
}

/// GET /comandas/mesa/{id} - current order for one mesa
///
/// A free mesa returns an empty item list, not an error.
pub async fn mesa_view(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MesaComandaView>> {
    let view = state.engine.mesa_view(id).await?;
    Ok(Json(view))
}

/// POST /comandas/agregar_item - add an item to the mesa's pending comanda
pub async fn agregar_item(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<AgregarItemRequest>,
) -> AppResult<Json<AgregarItemResponse>> {
    state
        .engine
        .add_item(req.mesa_id, req.item_id, user.id, req.cantidad)
        .await?;
    Ok(Json(AgregarItemResponse { success: true }))
}

/// POST /comandas/mesa/{id}/finalizar - close the pending comanda
pub async fn finalizar(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<Comanda>> {
    let comanda = state.engine.finalize(id, user.id).await?;
    Ok(Json(comanda))
}

/// GET /manager/comandas - all comandas, newest first
pub async fn list_all(State(state): State<ServerState>) -> AppResult<Json<Vec<ComandaResumen>>> {
    let comandas = repository::comanda::find_all_resumen(state.pool()).await?;
    Ok(Json(comandas))
}
