//! Zone API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::{dining_table, zone};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{DiningTable, Zone, ZoneCreate, ZoneUpdate};

fn zone_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::ZoneNotFound, format!("Zone {id} not found"))
}

/// GET /api/zones
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Zone>>> {
    let zones = zone::find_all(state.pool()).await?;
    Ok(Json(zones))
}

/// GET /api/zones/{id}
pub async fn get_by_id(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<Zone>> {
    let zone = zone::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| zone_not_found(id))?;
    Ok(Json(zone))
}

/// GET /api/zones/{id}/tables
pub async fn list_tables(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<DiningTable>>> {
    if zone::find_by_id(state.pool(), id).await?.is_none() {
        return Err(zone_not_found(id));
    }
    let tables = dining_table::find_by_zone(state.pool(), id).await?;
    Ok(Json(tables))
}

/// POST /api/zones
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ZoneCreate>,
) -> AppResult<(StatusCode, Json<Zone>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let zone = zone::create(state.pool(), payload).await?;
    tracing::info!(id = zone.id, name = %zone.name, "Zone created");
    Ok((StatusCode::CREATED, Json(zone)))
}

/// PATCH /api/zones/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ZoneUpdate>,
) -> AppResult<Json<Zone>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }

    let zone = zone::update(state.pool(), id, payload).await?;
    Ok(Json(zone))
}

/// DELETE /api/zones/{id}
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    let result = zone::delete(state.pool(), id).await?;
    tracing::info!(id, "Zone deleted");
    Ok(Json(result))
}
