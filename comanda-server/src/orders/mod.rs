//! Comanda Lifecycle Module
//!
//! The engine serializes order mutations per mesa and keeps every stored
//! `comanda.total` equal to the exact sum of its line totals:
//!
//! - **open_or_get**: reuse the pending comanda for a mesa or create one
//! - **add_item**: upsert a line (quantity increment, snapshotted price)
//! - **finalize**: move the pending comanda to `pagada`
//! - **mesa_view**: project the current order for one mesa

pub mod engine;

pub use engine::ComandaEngine;
