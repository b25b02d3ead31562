//! Bill Model

use super::serde_helpers::{flexible_id, option_timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Transfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Transfer => "transfer",
        }
    }
}

/// Bill entity (one per order)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Bill {
    pub id: i64,
    pub order_id: i64,
    pub total_amount: f64,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub received_amount: Option<f64>,
    pub change_amount: Option<f64>,
    pub payment_time: Option<i64>,
    pub created_at: i64,
}

/// Create bill payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillCreate {
    #[serde(alias = "orderId", deserialize_with = "flexible_id")]
    pub order_id: i64,
    /// Defaults to the computed order total
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub received_amount: Option<f64>,
    #[serde(default, deserialize_with = "option_timestamp")]
    pub payment_time: Option<i64>,
}

/// Update bill payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillUpdate {
    pub total_amount: Option<f64>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub received_amount: Option<f64>,
    #[serde(default, deserialize_with = "option_timestamp")]
    pub payment_time: Option<i64>,
}

/// List filter for `GET /api/bills`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillQuery {
    pub order_id: Option<i64>,
    pub payment_status: Option<PaymentStatus>,
}
