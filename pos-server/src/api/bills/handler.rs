//! Bill API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::auth::permissions::BILLS_VOID;
use crate::core::ServerState;
use crate::db::repository::bill;
use crate::money::validate_amount;
use crate::security_log;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Bill, BillCreate, BillQuery, BillUpdate, PaymentStatus};

fn bill_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::BillNotFound, format!("Bill {id} not found"))
}

fn validate_amounts(total: Option<f64>, received: Option<f64>) -> AppResult<()> {
    if let Some(total) = total {
        validate_amount(total, "total_amount")?;
    }
    if let Some(received) = received {
        validate_amount(received, "received_amount")?;
    }
    Ok(())
}

/// GET /api/bills
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<BillQuery>,
) -> AppResult<Json<Vec<Bill>>> {
    let bills = bill::find_all(state.pool(), &query).await?;
    Ok(Json(bills))
}

/// GET /api/bills/{id}
pub async fn get_by_id(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<Bill>> {
    let bill = bill::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| bill_not_found(id))?;
    Ok(Json(bill))
}

/// POST /api/bills
///
/// A bill created as `paid` settles its order in the same transaction.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BillCreate>,
) -> AppResult<(StatusCode, Json<Bill>)> {
    validate_amounts(payload.total_amount, payload.received_amount)?;

    let bill = bill::create(state.pool(), payload).await?;
    tracing::info!(
        bill_id = bill.id,
        order_id = bill.order_id,
        total = bill.total_amount,
        payment_status = bill.payment_status.as_str(),
        "Bill created"
    );
    Ok((StatusCode::CREATED, Json(bill)))
}

/// PATCH /api/bills/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BillUpdate>,
) -> AppResult<Json<Bill>> {
    validate_amounts(payload.total_amount, payload.received_amount)?;

    let bill = bill::update(state.pool(), id, payload).await?;
    tracing::info!(bill_id = id, payment_status = bill.payment_status.as_str(), "Bill updated");
    Ok(Json(bill))
}

/// DELETE /api/bills/{id}
///
/// Paid bills can only be voided with `bills:void`.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    user: CurrentUser,
) -> AppResult<Json<bool>> {
    let existing = bill::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| bill_not_found(id))?;

    if existing.payment_status == PaymentStatus::Paid && !user.has_permission(BILLS_VOID) {
        security_log!(
            "WARN",
            "permission_denied",
            user_id = user.id,
            username = user.username.clone(),
            required_permission = BILLS_VOID
        );
        return Err(AppError::permission_denied(format!(
            "Permission denied: {BILLS_VOID}"
        )));
    }

    let result = bill::delete(state.pool(), id).await?;
    tracing::info!(bill_id = id, voided_by = %user.username, "Bill deleted");
    Ok(Json(result))
}
