//! Grupo Model

use serde::{Deserialize, Serialize};

/// Menu group entity, keyed by its short codigo (e.g. "BEB" for bebidas)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Grupo {
    pub codigo: String,
    pub nombre: String,
}

/// Create grupo payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrupoCreate {
    pub codigo: String,
    pub nombre: String,
}

/// Update grupo payload
///
/// The codigo is the key items reference and cannot change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrupoUpdate {
    pub nombre: Option<String>,
}
