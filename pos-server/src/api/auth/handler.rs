//! Authentication Handlers
//!
//! Login, current user, token refresh and password change

use std::time::Duration;

use axum::{Json, extract::State};

use crate::auth::{CurrentUser, permissions};
use crate::core::ServerState;
use crate::db::repository::user::{self, Credentials};
use crate::security_log;
use crate::utils::validation::validate_password;
use crate::utils::{AppError, AppResult, ErrorCode};

use shared::client::{ChangePasswordRequest, LoginRequest, LoginResponse, TokenResponse, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

fn user_info(credentials: &Credentials) -> UserInfo {
    UserInfo {
        id: credentials.id,
        username: credentials.username.clone(),
        display_name: credentials.display_name(),
        role: credentials.role,
        permissions: permissions::for_role(credentials.role),
    }
}

fn issue_token(state: &ServerState, credentials: &Credentials) -> AppResult<String> {
    state
        .jwt_service
        .generate_token(credentials.id, &credentials.username, credentials.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))
}

/// POST /api/auth/login
///
/// Unknown user and wrong password answer the same error.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let username = req.username.trim().to_string();
    let credentials = user::find_credentials(state.pool(), &username).await?;

    // Fixed delay before looking at the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let credentials = match credentials {
        Some(c) if c.verify_password(&req.password) => c,
        Some(_) => {
            security_log!("WARN", "login_failed", username = username.clone(), reason = "invalid_password");
            return Err(AppError::invalid_credentials());
        }
        None => {
            security_log!("WARN", "login_failed", username = username.clone(), reason = "user_not_found");
            return Err(AppError::invalid_credentials());
        }
    };

    if !credentials.is_active {
        security_log!("WARN", "login_disabled", username = username.clone());
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let token = issue_token(&state, &credentials)?;

    tracing::info!(
        user_id = credentials.id,
        username = %credentials.username,
        role = credentials.role.as_str(),
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        user: user_info(&credentials),
    }))
}

/// Reload the caller, refusing removed or disabled accounts
async fn active_credentials(state: &ServerState, user: &CurrentUser) -> AppResult<Credentials> {
    let credentials = user::find_credentials_by_id(state.pool(), user.id)
        .await?
        .ok_or_else(AppError::not_authenticated)?;
    if !credentials.is_active {
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }
    Ok(credentials)
}

/// GET /api/auth/me
pub async fn me(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<UserInfo>> {
    let credentials = active_credentials(&state, &user).await?;
    Ok(Json(user_info(&credentials)))
}

/// POST /api/auth/refresh - new token for a still valid one
pub async fn refresh(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<TokenResponse>> {
    let credentials = active_credentials(&state, &user).await?;
    let token = issue_token(&state, &credentials)?;
    tracing::debug!(user_id = user.id, "Token refreshed");
    Ok(Json(TokenResponse { token }))
}

/// POST /api/auth/change-password
pub async fn change_password(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> AppResult<Json<bool>> {
    let credentials = active_credentials(&state, &user).await?;
    if !credentials.verify_password(&req.old_password) {
        security_log!("WARN", "password_change_failed", user_id = user.id);
        return Err(AppError::invalid_credentials());
    }
    validate_password(&req.new_password)?;

    user::change_password(state.pool(), user.id, &req.new_password).await?;
    tracing::info!(user_id = user.id, "Password changed");
    Ok(Json(true))
}
