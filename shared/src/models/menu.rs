//! Menu Model

use super::Availability;
use super::serde_helpers::{flexible_id, option_flexible_id};
use serde::{Deserialize, Serialize};

/// Menu item entity
///
/// `category_name` is joined from the categories table on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Menu {
    pub id: i64,
    pub category_id: i64,
    pub category_name: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: f64,
    pub status: Availability,
    pub created_at: i64,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCreate {
    #[serde(alias = "categoryId", deserialize_with = "flexible_id")]
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(alias = "imageUrl")]
    pub image_url: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub status: Availability,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuUpdate {
    #[serde(
        default,
        alias = "categoryId",
        deserialize_with = "option_flexible_id"
    )]
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "imageUrl")]
    pub image_url: Option<String>,
    pub price: Option<f64>,
    pub status: Option<Availability>,
}

/// List filter for `GET /api/menus`
///
/// `name` is an exact match, used by the browser's duplicate-name check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuQuery {
    pub name: Option<String>,
    pub category_id: Option<i64>,
    pub status: Option<Availability>,
}
