//! Authentication middleware
//!
//! Axum middleware for JWT authentication and authorization.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtError, JwtService, permissions};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::security_log;
use crate::utils::{AppError, ErrorCode};

/// Paths under `/api/` reachable without a token
const PUBLIC_API_ROUTES: &[&str] = &["/api/auth/login"];

/// Require a valid bearer token on every `/api/` route
///
/// On success the [`CurrentUser`] is inserted into the request extensions.
/// Role and permissions come from the stored account, so disabling or
/// demoting a user takes effect on their next request.
///
/// Skipped for:
/// - `OPTIONS` (CORS preflight)
/// - paths outside `/api/` (health, unknown routes fall through to 404)
/// - `/api/auth/login`
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path();
    if !path.starts_with("/api/") || PUBLIC_API_ROUTES.contains(&path) {
        return Ok(next.run(req).await);
    }

    let headers = req.headers().clone();
    let uri = req.uri().clone();
    let user = authenticate(&state, &headers, &uri).await?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Validate the `Authorization` header and load the caller's account
pub(crate) async fn authenticate(
    state: &ServerState,
    headers: &http::HeaderMap,
    uri: &http::Uri,
) -> Result<CurrentUser, AppError> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = uri.path());
            return Err(AppError::not_authenticated());
        }
    };

    let claims = match state.jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                uri = uri.path()
            );
            return match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            };
        }
    };

    let Some(account) = user::find_credentials_by_id(state.pool(), claims.user_id).await? else {
        security_log!("WARN", "auth_unknown_user", user_id = claims.user_id, uri = uri.path());
        return Err(AppError::not_authenticated());
    };
    if !account.is_active {
        security_log!("WARN", "auth_disabled", user_id = account.id, uri = uri.path());
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    Ok(CurrentUser {
        id: account.id,
        username: account.username,
        role: account.role,
        permissions: permissions::for_role(account.role),
    })
}

/// Require a permission on a route group
///
/// ```ignore
/// Router::new()
///     .route("/", post(handler::create))
///     .layer(middleware::from_fn(require_permission("menu:manage")));
/// ```
pub fn require_permission(
    permission: &'static str,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or_else(AppError::not_authenticated)?;

            if !user.has_permission(permission) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = user.id,
                    username = user.username.clone(),
                    required_permission = permission
                );
                return Err(AppError::permission_denied(format!(
                    "Permission denied: {}",
                    permission
                )));
            }

            Ok(next.run(req).await)
        })
    }
}

/// Require the admin role
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::not_authenticated)?;
    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id,
            username = user.username.clone(),
            user_role = user.role.as_str()
        );
        return Err(AppError::admin_required());
    }

    Ok(next.run(req).await)
}
