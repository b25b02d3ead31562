//! Utilities
//!
//! - [`AppError`] (from `shared::error`) and its mapping from repository errors
//! - logging setup
//! - input validation helpers

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResult, ErrorCode};
