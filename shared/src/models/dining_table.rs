//! Dining Table Model

use super::Availability;
use super::serde_helpers::{
    flexible_id, option_flexible_id, option_string_or_number, string_or_number,
};
use serde::{Deserialize, Serialize};

/// Dining table entity
///
/// `zone_name` is joined from the zones table on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    pub table_number: String,
    pub zone_id: i64,
    pub zone_name: Option<String>,
    pub status: Availability,
    pub created_at: i64,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    #[serde(alias = "tableNumber", deserialize_with = "string_or_number")]
    pub table_number: String,
    #[serde(alias = "zoneId", deserialize_with = "flexible_id")]
    pub zone_id: i64,
    #[serde(default)]
    pub status: Availability,
}

/// Update dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    #[serde(
        default,
        alias = "tableNumber",
        deserialize_with = "option_string_or_number"
    )]
    pub table_number: Option<String>,
    #[serde(default, alias = "zoneId", deserialize_with = "option_flexible_id")]
    pub zone_id: Option<i64>,
    pub status: Option<Availability>,
}

/// List filter for `GET /api/table`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiningTableQuery {
    /// Zone id
    pub zone: Option<i64>,
    pub status: Option<Availability>,
}
