//! Repository Module
//!
//! Free functions over a `SqlitePool` (or an open transaction), one module
//! per table.

// Auth
pub mod user;

// Catalog
pub mod category;
pub mod menu;

// Location
pub mod dining_table;
pub mod zone;

// Orders
pub mod bill;
pub mod order;
pub mod order_item;

// Reports
pub mod dashboard;

use shared::error::ErrorCode;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Domain rule violation with a specific error code
    #[error("{1}")]
    Business(ErrorCode, String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound("Row not found".into()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepoError::Duplicate(db_err.message().to_string())
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                RepoError::Validation(format!("Referenced record missing: {}", db_err.message()))
            }
            sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
                RepoError::Validation(format!("Constraint failed: {}", db_err.message()))
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl RepoError {
    pub fn business(code: ErrorCode, msg: impl Into<String>) -> Self {
        RepoError::Business(code, msg.into())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Map a unique-constraint failure to a domain error code
pub(crate) fn duplicate_as(
    code: ErrorCode,
    msg: impl Into<String>,
) -> impl FnOnce(sqlx::Error) -> RepoError {
    let msg = msg.into();
    move |err| match RepoError::from(err) {
        RepoError::Duplicate(_) => RepoError::Business(code, msg),
        other => other,
    }
}
