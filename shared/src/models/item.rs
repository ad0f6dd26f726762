//! Item Model

use serde::{Deserialize, Serialize};

use super::money;

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Item {
    pub id: i64,
    pub nombre: String,
    /// Unit price in cents; serialized as a two-decimal number
    #[serde(with = "money::cents")]
    pub precio: i64,
    /// Units in stock; items at zero are hidden from order taking
    pub existencia: i64,
    /// Grupo this item belongs to (references `grupos.codigo`)
    pub grupo_codigo: String,
    pub is_active: bool,
}

/// Create item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCreate {
    pub nombre: String,
    #[serde(with = "money::cents")]
    pub precio: i64,
    pub existencia: Option<i64>,
    pub grupo_codigo: String,
}

/// Update item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub nombre: Option<String>,
    #[serde(default, with = "money::cents_opt")]
    pub precio: Option<i64>,
    pub existencia: Option<i64>,
    pub grupo_codigo: Option<String>,
    pub is_active: Option<bool>,
}
