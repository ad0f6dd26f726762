//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`auth`] - login, logout, current user
//! - [`comandas`] - order screen, per-mesa order operations, manager list
//! - [`items`] - item CRUD
//! - [`grupos`] - grupo CRUD
//! - [`mesas`] - mesa CRUD
//! - [`usuarios`] - user CRUD
//! - [`ventas`] - sales report

pub mod auth;
pub mod health;

// Catalog APIs
pub mod grupos;
pub mod items;
pub mod mesas;
pub mod usuarios;

// Order APIs
pub mod comandas;
pub mod ventas;
