//! Order Item Model

use super::serde_helpers::flexible_id;
use serde::{Deserialize, Serialize};

/// Order line
///
/// `menu_name` is joined from the menu table; `line_total` is computed
/// after the row is loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_id: i64,
    pub menu_name: Option<String>,
    pub quantity: i64,
    pub price: f64,
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub line_total: f64,
}

/// Create order item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemCreate {
    #[serde(alias = "orderId", deserialize_with = "flexible_id")]
    pub order_id: i64,
    #[serde(alias = "menuId", deserialize_with = "flexible_id")]
    pub menu_id: i64,
    pub quantity: i64,
    /// Defaults to the menu's current price
    pub price: Option<f64>,
}

/// Update order item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderItemUpdate {
    pub quantity: Option<i64>,
    pub price: Option<f64>,
}

/// List filter for `GET /api/order_items`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderItemQuery {
    #[serde(alias = "orderId")]
    pub order_id: Option<i64>,
}
