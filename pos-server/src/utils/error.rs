//! Unified error handling
//!
//! Handlers return [`AppError`] from `shared::error`; its `IntoResponse`
//! writes `{"code", "message", "details"}` with the status of the code.
//! Repository errors are mapped here.

pub use shared::error::{AppError, AppResult, ErrorCode};

use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Business(code, msg) => AppError::with_message(code, msg),
            RepoError::Database(msg) => {
                tracing::error!(target: "database", error = %msg, "Database error occurred");
                AppError::database("Database error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_repo_error_mapping() {
        let e: AppError = RepoError::NotFound("Menu item 1 not found".into()).into();
        assert_eq!(e.http_status(), StatusCode::NOT_FOUND);

        let e: AppError = RepoError::business(ErrorCode::MenuInUse, "in use").into();
        assert_eq!(e.code, ErrorCode::MenuInUse);
        assert_eq!(e.http_status(), StatusCode::CONFLICT);

        let e: AppError = RepoError::Duplicate("UNIQUE constraint failed".into()).into();
        assert_eq!(e.http_status(), StatusCode::CONFLICT);

        let e: AppError = RepoError::Database("disk I/O error".into()).into();
        assert_eq!(e.code, ErrorCode::DatabaseError);
        assert_eq!(e.message, "Database error");
    }
}
