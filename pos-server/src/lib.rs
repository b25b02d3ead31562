//! POS Server - restaurant point-of-sale back end
//!
//! # Overview
//!
//! - **HTTP API** (`api`): REST resources for menus, tables, orders and bills
//! - **Database** (`db`): SQLite through sqlx, one repository module per table
//! - **Auth** (`auth`): JWT + Argon2, role based permissions
//! - **Money** (`money`): decimal totals and payment checks
//!
//! # Layout
//!
//! ```text
//! pos-server/src/
//! ├── core/          # config, state, server, startup errors
//! ├── auth/          # JWT, permissions, middleware
//! ├── api/           # routes and handlers
//! ├── db/            # pool, migrations, repositories
//! ├── money.rs       # rust_decimal helpers
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod money;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_app};
pub use utils::{AppError, AppResult};

// Re-export the shared error codes
pub use utils::ErrorCode;

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    ____  ____  _____
   / __ \/ __ \/ ___/
  / /_/ / / / /\__ \
 / ____/ /_/ /___/ /
/_/    \____//____/
    "#
    );
}
