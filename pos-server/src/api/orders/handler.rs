//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::order;
use crate::money::{validate_amount, validate_price, validate_quantity};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{
    OrderCreate, OrderCreated, OrderDetail, OrderItemInput, OrderQuery, OrderSummary,
    OrderUpdate, PayOrderRequest, PaymentReceipt,
};

fn validate_items(items: &[OrderItemInput]) -> AppResult<()> {
    for item in items {
        validate_quantity(item.quantity)?;
        if let Some(price) = item.price {
            validate_price(price, "price")?;
        }
    }
    Ok(())
}

/// GET /api/order
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderQuery>,
) -> AppResult<Json<Vec<OrderSummary>>> {
    let orders = order::find_all(state.pool(), &query).await?;
    Ok(Json(orders))
}

/// GET /api/order/{id} - order with its items and total
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let detail = order::find_detail(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found")))?;
    Ok(Json(detail))
}

/// POST /api/order
///
/// Order and items are written in one transaction; `user_id` defaults to
/// the caller.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<OrderCreated>)> {
    validate_items(&payload.order_items)?;

    let detail = order::create(state.pool(), payload, user.id).await?;
    tracing::info!(
        order_id = detail.order.id,
        table_id = detail.order.table_id,
        user_id = detail.order.user_id,
        items = detail.items.len(),
        total = detail.total_amount,
        "Order created"
    );

    Ok((
        StatusCode::CREATED,
        Json(OrderCreated {
            order_id: detail.order.id,
            order: detail,
        }),
    ))
}

/// PATCH /api/order/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<OrderDetail>> {
    if let Some(items) = &payload.order_items {
        validate_items(items)?;
    }

    let detail = order::update(state.pool(), id, payload).await?;
    tracing::info!(order_id = id, status = detail.order.status.as_str(), "Order updated");
    Ok(Json(detail))
}

/// DELETE /api/order/{id}
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    let result = order::delete(state.pool(), id).await?;
    tracing::info!(order_id = id, "Order deleted");
    Ok(Json(result))
}

/// POST /api/order/{id}/pay
///
/// Settles the order in one step: paid bill with change, order `paid`.
pub async fn pay(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    user: CurrentUser,
    Json(payload): Json<PayOrderRequest>,
) -> AppResult<Json<PaymentReceipt>> {
    validate_amount(payload.received_amount, "received_amount")?;

    let receipt = order::pay(state.pool(), id, payload).await?;
    tracing::info!(
        order_id = id,
        bill_id = receipt.bill.id,
        total = receipt.bill.total_amount,
        change = receipt.bill.change_amount.unwrap_or_default(),
        cashier = %user.username,
        "Order paid"
    );
    Ok(Json(receipt))
}
