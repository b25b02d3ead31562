//! Zone Model

use super::Availability;
use serde::{Deserialize, Serialize};

/// Seating area (hall, terrace, private room)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Zone {
    pub id: i64,
    pub name: String,
    pub status: Availability,
    pub created_at: i64,
}

/// Create zone payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneCreate {
    #[serde(alias = "zoneName")]
    pub name: String,
    #[serde(default)]
    pub status: Availability,
}

/// Update zone payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneUpdate {
    #[serde(alias = "zoneName")]
    pub name: Option<String>,
    pub status: Option<Availability>,
}
