//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// The 3xxx range is unused and falls back to [`ErrorCategory::General`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Order errors (4xxx)
    Order,
    /// Payment and bill errors (5xxx)
    Payment,
    /// Menu and category errors (6xxx)
    Menu,
    /// Table and zone errors (7xxx)
    Table,
    /// User errors (8xxx)
    User,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Order => "order",
            Self::Payment => "payment",
            Self::Menu => "menu",
            Self::Table => "table",
            Self::User => "user",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            1000..2000 => ErrorCategory::Auth,
            2000..3000 => ErrorCategory::Permission,
            4000..5000 => ErrorCategory::Order,
            5000..6000 => ErrorCategory::Payment,
            6000..7000 => ErrorCategory::Menu,
            7000..8000 => ErrorCategory::Table,
            8000..9000 => ErrorCategory::User,
            9000.. => ErrorCategory::System,
            _ => ErrorCategory::General,
        }
    }
}
