//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::menu;
use crate::money::validate_price;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, normalize_optional, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Menu, MenuCreate, MenuQuery, MenuUpdate};

/// GET /api/menus
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<Vec<Menu>>> {
    let menus = menu::find_all(state.pool(), &query).await?;
    Ok(Json(menus))
}

/// GET /api/menus/{id}
pub async fn get_by_id(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<Menu>> {
    let menu = menu::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::MenuNotFound, format!("Menu item {id} not found")))?;
    Ok(Json(menu))
}

/// POST /api/menus
pub async fn create(
    State(state): State<ServerState>,
    Json(mut payload): Json<MenuCreate>,
) -> AppResult<(StatusCode, Json<Menu>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    validate_price(payload.price, "price")?;
    payload.description = normalize_optional(payload.description);
    payload.image_url = normalize_optional(payload.image_url);

    let menu = menu::create(state.pool(), payload).await?;
    tracing::info!(id = menu.id, name = %menu.name, price = menu.price, "Menu item created");
    Ok((StatusCode::CREATED, Json(menu)))
}

/// PATCH /api/menus/{id}
///
/// Partial update; a body with only `status` toggles availability.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuUpdate>,
) -> AppResult<Json<Menu>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    if let Some(price) = payload.price {
        validate_price(price, "price")?;
    }

    let menu = menu::update(state.pool(), id, payload).await?;
    tracing::info!(id, status = menu.status.as_str(), "Menu item updated");
    Ok(Json(menu))
}

/// DELETE /api/menus/{id}
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    let result = menu::delete(state.pool(), id).await?;
    tracing::info!(id, "Menu item deleted");
    Ok(Json(result))
}
