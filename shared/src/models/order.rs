//! Order Model

use super::bill::{Bill, PaymentMethod};
use super::order_item::OrderItem;
use super::serde_helpers::{flexible_id, option_flexible_id};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle
///
/// ```text
/// pending ──┬──> updated ──┬──> paid
///           │      ↺       └──> cancelled
///           ├──> paid
///           └──> cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Updated,
    Paid,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Updated => "updated",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }

    /// Paid and cancelled orders never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Cancelled)
    }

    /// Orders that still occupy their table
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Updated)
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        match (self, next) {
            (Self::Pending, Self::Pending) => true,
            (Self::Pending | Self::Updated, Self::Updated | Self::Paid | Self::Cancelled) => true,
            _ => false,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub table_id: i64,
    pub user_id: i64,
    pub status: OrderStatus,
    pub order_time: i64,
    pub updated_at: i64,
}

/// Order list row with table number and computed totals
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderSummary {
    pub id: i64,
    pub table_id: i64,
    pub table_number: Option<String>,
    pub user_id: i64,
    pub status: OrderStatus,
    pub order_time: i64,
    pub updated_at: i64,
    pub item_count: i64,
    pub total_amount: f64,
}

/// Order with its line items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub table_number: Option<String>,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
}

/// Line item inside an order create/update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    #[serde(alias = "menuId", deserialize_with = "flexible_id")]
    pub menu_id: i64,
    pub quantity: i64,
    /// Defaults to the menu's current price
    pub price: Option<f64>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    #[serde(alias = "tableId", deserialize_with = "flexible_id")]
    pub table_id: i64,
    /// Defaults to the authenticated user
    #[serde(default, alias = "userId", deserialize_with = "option_flexible_id")]
    pub user_id: Option<i64>,
    pub status: Option<OrderStatus>,
    #[serde(default, alias = "orderItems")]
    pub order_items: Vec<OrderItemInput>,
}

/// Update order payload
///
/// `order_items`, when present, replaces every line of the order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    #[serde(default, alias = "tableId", deserialize_with = "option_flexible_id")]
    pub table_id: Option<i64>,
    #[serde(default, alias = "userId", deserialize_with = "option_flexible_id")]
    pub user_id: Option<i64>,
    pub status: Option<OrderStatus>,
    #[serde(alias = "orderItems")]
    pub order_items: Option<Vec<OrderItemInput>>,
}

/// Response of `POST /api/order`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreated {
    #[serde(rename = "orderId")]
    pub order_id: i64,
    pub order: OrderDetail,
}

/// List filter for `GET /api/order`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderQuery {
    pub status: Option<OrderStatus>,
    pub table_id: Option<i64>,
}

/// Payload of `POST /api/order/{id}/pay`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayOrderRequest {
    pub received_amount: f64,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// Result of a completed payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub bill: Bill,
    pub order: OrderDetail,
}
