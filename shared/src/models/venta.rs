//! Sales report rows

use serde::{Deserialize, Serialize};

use super::money;

/// Aggregated sales for one item over the reporting window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct VentaItem {
    pub item_id: i64,
    pub nombre: String,
    /// Total units sold
    pub cantidad: i64,
    /// Total revenue in cents
    #[serde(with = "money::cents")]
    pub total: i64,
}
