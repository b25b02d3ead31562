//! Shared types for the restaurant POS
//!
//! Wire models, error codes, auth DTOs and small utilities used by both
//! `pos-server` and `pos-client`.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};
