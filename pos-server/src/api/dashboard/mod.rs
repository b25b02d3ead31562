//! Dashboard API module

use axum::{Json, Router, extract::State, middleware, routing::get};
use chrono::Utc;
use shared::models::DashboardStats;

use crate::auth::permissions::REPORTS_VIEW;
use crate::auth::require_permission;
use crate::core::ServerState;
use crate::db::repository::dashboard;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/dashboard", get(stats))
        .layer(middleware::from_fn(require_permission(REPORTS_VIEW)))
}

/// GET /api/dashboard - sales totals with monthly and daily buckets
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<DashboardStats>> {
    let stats = dashboard::stats(state.pool(), Utc::now()).await?;
    Ok(Json(stats))
}
