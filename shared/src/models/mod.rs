//! Data models
//!
//! Shared between the server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), except grupos which are
//! keyed by their short text codigo.

pub mod comanda;
pub mod grupo;
pub mod item;
pub mod mesa;
pub mod money;
pub mod usuario;
pub mod venta;

// Re-exports
pub use comanda::*;
pub use grupo::*;
pub use item::*;
pub use mesa::*;
pub use usuario::*;
pub use venta::*;
