//! POS Client - typed HTTP client for the POS server
//!
//! One method per REST endpoint, mirroring the browser's service wrappers.

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::client::{HealthResponse, LoginResponse, UserInfo};
pub use shared::error::ErrorCode;
pub use shared::models;
