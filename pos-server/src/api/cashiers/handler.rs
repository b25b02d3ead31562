//! Cashier API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, normalize_optional, validate_email, validate_optional_text,
    validate_password, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{User, UserCreate, UserUpdate};

/// GET /api/cashiers
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<User>>> {
    let users = user::find_all(state.pool()).await?;
    Ok(Json(users))
}

/// GET /api/cashiers/{id}
pub async fn get_by_id(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<User>> {
    let user = user::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::UserNotFound, format!("User {id} not found")))?;
    Ok(Json(user))
}

/// POST /api/cashiers
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(mut payload): Json<UserCreate>,
) -> AppResult<(StatusCode, Json<User>)> {
    validate_required_text(&payload.username, "username", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.first_name, "first_name", MAX_NAME_LEN)?;
    validate_optional_text(&Some(payload.last_name.clone()), "last_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;
    payload.email = normalize_optional(payload.email);
    payload.phone = normalize_optional(payload.phone);

    let user = user::create(state.pool(), payload).await?;
    tracing::info!(
        id = user.id,
        username = %user.username,
        role = user.role.as_str(),
        created_by = %current.username,
        "User created"
    );
    Ok((StatusCode::CREATED, Json(user)))
}

/// PATCH /api/cashiers/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<User>> {
    if let Some(username) = &payload.username {
        validate_required_text(username, "username", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(first_name) = &payload.first_name {
        validate_required_text(first_name, "first_name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.last_name, "last_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_email(&payload.email)?;
    if let Some(password) = &payload.password {
        validate_password(password)?;
    }

    let user = user::update(state.pool(), id, payload).await?;
    tracing::info!(id, is_active = user.is_active, role = user.role.as_str(), "User updated");
    Ok(Json(user))
}

/// DELETE /api/cashiers/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    current: CurrentUser,
) -> AppResult<Json<bool>> {
    let result = user::delete(state.pool(), id, current.id).await?;
    tracing::info!(id, deleted_by = %current.username, "User deleted");
    Ok(Json(result))
}
