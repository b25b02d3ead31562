//! Order Item API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::order_item;
use crate::money::{validate_price, validate_quantity};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{OrderItem, OrderItemCreate, OrderItemQuery, OrderItemUpdate};

/// GET /api/order_items?orderId=
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderItemQuery>,
) -> AppResult<Json<Vec<OrderItem>>> {
    let items = order_item::find_all(state.pool(), &query).await?;
    Ok(Json(items))
}

/// GET /api/order_items/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderItem>> {
    let item = order_item::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderItemNotFound, format!("Order item {id} not found"))
        })?;
    Ok(Json(item))
}

/// POST /api/order_items
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderItemCreate>,
) -> AppResult<(StatusCode, Json<OrderItem>)> {
    validate_quantity(payload.quantity)?;
    if let Some(price) = payload.price {
        validate_price(price, "price")?;
    }

    let item = order_item::create(state.pool(), payload).await?;
    tracing::info!(id = item.id, order_id = item.order_id, menu_id = item.menu_id, "Order item added");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH /api/order_items/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderItemUpdate>,
) -> AppResult<Json<OrderItem>> {
    if let Some(quantity) = payload.quantity {
        validate_quantity(quantity)?;
    }
    if let Some(price) = payload.price {
        validate_price(price, "price")?;
    }

    let item = order_item::update(state.pool(), id, payload).await?;
    Ok(Json(item))
}

/// DELETE /api/order_items/{id}
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    let result = order_item::delete(state.pool(), id).await?;
    tracing::info!(id, "Order item removed");
    Ok(Json(result))
}
