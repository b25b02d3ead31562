//! Client error types

use serde::Deserialize;
use shared::error::ErrorCode;
use thiserror::Error;

/// Client error type
///
/// Non-2xx responses are decoded from the server's `{code, message}` body.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 401
    #[error("Authentication required: {message}")]
    Unauthorized { code: u16, message: String },

    /// 403
    #[error("Permission denied: {message}")]
    Forbidden { code: u16, message: String },

    /// 404
    #[error("Not found: {message}")]
    NotFound { code: u16, message: String },

    /// 409
    #[error("Conflict: {message}")]
    Conflict { code: u16, message: String },

    /// 400
    #[error("Validation error: {message}")]
    Validation { code: u16, message: String },

    /// Any other error status
    #[error("API error {status} (code {code}): {message}")]
    Api { status: u16, code: u16, message: String },

    /// Body could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error body written by the server
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: String,
}

impl ClientError {
    /// Build the error for a failed response
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        let (code, message) = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => (parsed.code.unwrap_or(0), parsed.message),
            Err(_) => (0, body.to_string()),
        };
        match status {
            401 => ClientError::Unauthorized { code, message },
            403 => ClientError::Forbidden { code, message },
            404 => ClientError::NotFound { code, message },
            409 => ClientError::Conflict { code, message },
            400 | 422 => ClientError::Validation { code, message },
            _ => ClientError::Api {
                status,
                code,
                message,
            },
        }
    }

    /// Server error code, when the failure came from the API
    pub fn code(&self) -> Option<ErrorCode> {
        let raw = match self {
            ClientError::Unauthorized { code, .. }
            | ClientError::Forbidden { code, .. }
            | ClientError::NotFound { code, .. }
            | ClientError::Conflict { code, .. }
            | ClientError::Validation { code, .. }
            | ClientError::Api { code, .. } => *code,
            _ => return None,
        };
        ErrorCode::try_from(raw).ok()
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
