//! Comanda Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::mesa::Mesa;
use super::money;

/// Comanda lifecycle status
///
/// Stored as lowercase TEXT. At most one `pendiente` comanda may exist per
/// mesa at a time; `finalize` moves it to `pagada`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum ComandaEstatus {
    Pendiente,
    Pagada,
}

impl ComandaEstatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComandaEstatus::Pendiente => "pendiente",
            ComandaEstatus::Pagada => "pagada",
        }
    }
}

/// Customer order tied to one mesa
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Comanda {
    pub id: i64,
    pub mesa_id: i64,
    /// User who opened the comanda
    pub usuario_id: i64,
    pub estatus: ComandaEstatus,
    /// Exact sum of line totals, in cents
    #[serde(with = "money::cents")]
    pub total: i64,
    pub fecha: DateTime<Utc>,
}

/// One line within a comanda
///
/// `precio_unitario` is snapshotted from the item price at first addition;
/// later increments reuse it even if the catalog price changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ComandaDetalle {
    pub id: i64,
    pub comanda_id: i64,
    pub item_id: i64,
    pub cantidad: i64,
    #[serde(with = "money::cents")]
    pub precio_unitario: i64,
    #[serde(with = "money::cents")]
    pub total: i64,
}

/// Line projection for the mesa order view (joined with item names)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ComandaLinea {
    pub item_id: i64,
    pub nombre: String,
    pub cantidad: i64,
    #[serde(with = "money::cents")]
    pub precio_unitario: i64,
    #[serde(with = "money::cents")]
    pub total: i64,
}

/// Order view for one mesa
///
/// A free mesa yields an empty `items` array, a zero total and no
/// `comanda_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MesaComandaView {
    pub mesa: Mesa,
    pub items: Vec<ComandaLinea>,
    #[serde(with = "money::cents")]
    pub total: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comanda_id: Option<i64>,
}

/// Comanda list row for the manager view (joined display names)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ComandaResumen {
    pub id: i64,
    pub mesa_id: i64,
    pub mesa_nombre: String,
    pub usuario_id: i64,
    pub usuario_nombre: String,
    pub estatus: ComandaEstatus,
    #[serde(with = "money::cents")]
    pub total: i64,
    pub fecha: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estatus_serde() {
        assert_eq!(
            serde_json::to_string(&ComandaEstatus::Pendiente).unwrap(),
            "\"pendiente\""
        );
        assert_eq!(
            serde_json::to_string(&ComandaEstatus::Pagada).unwrap(),
            "\"pagada\""
        );

        let estatus: ComandaEstatus = serde_json::from_str("\"pendiente\"").unwrap();
        assert_eq!(estatus, ComandaEstatus::Pendiente);
    }

    #[test]
    fn test_view_money_serialization() {
        let view = MesaComandaView {
            mesa: Mesa {
                id: 1,
                nombre: "T1".to_string(),
            },
            items: vec![ComandaLinea {
                item_id: 2,
                nombre: "Coffee".to_string(),
                cantidad: 2,
                precio_unitario: 250,
                total: 500,
            }],
            total: 500,
            comanda_id: Some(9),
        };

        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"precio_unitario\":2.5"));
        assert!(json.contains("\"total\":5.0"));
        assert!(json.contains("\"comanda_id\":9"));
    }

    #[test]
    fn test_free_mesa_view_omits_comanda_id() {
        let view = MesaComandaView {
            mesa: Mesa {
                id: 3,
                nombre: "T3".to_string(),
            },
            items: vec![],
            total: 0,
            comanda_id: None,
        };

        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("comanda_id"));
        assert!(json.contains("\"total\":0.0"));
    }
}
