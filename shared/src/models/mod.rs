//! Data models
//!
//! Shared between pos-server, pos-client and the browser (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps are epoch
//! milliseconds.

pub mod bill;
pub mod category;
pub mod dashboard;
pub mod dining_table;
pub mod menu;
pub mod order;
pub mod order_item;
pub mod serde_helpers;
pub mod status;
pub mod user;
pub mod zone;

// Re-exports
pub use bill::*;
pub use category::*;
pub use dashboard::*;
pub use dining_table::*;
pub use menu::*;
pub use order::*;
pub use order_item::*;
pub use status::*;
pub use user::*;
pub use zone::*;
