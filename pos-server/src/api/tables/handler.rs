//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::dining_table;
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{DiningTable, DiningTableCreate, DiningTableQuery, DiningTableUpdate};

/// GET /api/table
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<DiningTableQuery>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = dining_table::find_all(state.pool(), &query).await?;
    Ok(Json(tables))
}

/// GET /api/table/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DiningTable>> {
    let table = dining_table::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::TableNotFound, format!("Table {id} not found")))?;
    Ok(Json(table))
}

/// POST /api/table
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<(StatusCode, Json<DiningTable>)> {
    validate_required_text(&payload.table_number, "table_number", MAX_SHORT_TEXT_LEN)?;

    let table = dining_table::create(state.pool(), payload).await?;
    tracing::info!(id = table.id, table_number = %table.table_number, zone_id = table.zone_id, "Table created");
    Ok((StatusCode::CREATED, Json(table)))
}

/// PATCH | PUT /api/table/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    if let Some(number) = &payload.table_number {
        validate_required_text(number, "table_number", MAX_SHORT_TEXT_LEN)?;
    }

    let table = dining_table::update(state.pool(), id, payload).await?;
    Ok(Json(table))
}

/// DELETE /api/table/{id}
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    let result = dining_table::delete(state.pool(), id).await?;
    tracing::info!(id, "Table deleted");
    Ok(Json(result))
}
