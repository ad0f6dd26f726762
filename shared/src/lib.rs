//! Shared types for the comanda server
//!
//! Common types used across crates including HTTP types, error types,
//! response structures, and data models.

pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

// Error system re-exports (for convenient access)
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
