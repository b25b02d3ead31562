//! Dashboard statistics

use serde::{Deserialize, Serialize};

/// Sales in one calendar bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesBucket {
    /// `YYYY-MM` for months, `YYYY-MM-DD` for days
    pub label: String,
    pub total: f64,
    pub bills: i64,
}

/// Response of `GET /api/dashboard`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_sales: f64,
    pub total_bills: i64,
    pub total_menus: i64,
    pub total_tables: i64,
    /// Twelve buckets for the current year, January first
    #[serde(alias = "monthlySales")]
    pub monthly_sales: Vec<SalesBucket>,
    /// Last seven days, oldest first
    #[serde(alias = "dailySales")]
    pub daily_sales: Vec<SalesBucket>,
}
