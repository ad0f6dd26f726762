//! Mesa Model

use serde::{Deserialize, Serialize};

/// Dining table entity
///
/// Occupancy is not stored; it is derived from the existence of a pending
/// comanda (see [`MesaEstado`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Mesa {
    pub id: i64,
    pub nombre: String,
}

/// Create mesa payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MesaCreate {
    pub nombre: String,
}

/// Update mesa payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MesaUpdate {
    pub nombre: Option<String>,
}

/// Mesa with derived occupancy status
///
/// `estatus` is `"ocupada"` while a pending comanda references the mesa,
/// otherwise `"libre"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MesaEstado {
    pub id: i64,
    pub nombre: String,
    pub estatus: String,
}
