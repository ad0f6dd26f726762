//! Repository Module
//!
//! Plain async functions over the SQLite pool, one module per table.
//! Mutations that must stay atomic across tables live in the comanda
//! engine, which drives these tables inside a single transaction.

pub mod comanda;
pub mod grupo;
pub mod item;
pub mod mesa;
pub mod usuario;
pub mod venta;

use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("In use: {0}")]
    InUse(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            sqlx::Error::Database(e) if e.is_unique_violation() => {
                RepoError::Duplicate(err.to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Fallback mapping to API errors; handlers override it where a more
/// specific code exists (e.g. `GroupHasItems` for an in-use grupo).
impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::InUse(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
