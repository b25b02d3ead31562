//! Order Item Repository
//!
//! Single-line edits. Each change re-checks the parent order and marks a
//! pending order as updated.

use super::order::{self, ITEM_SELECT};
use super::{RepoError, RepoResult};
use crate::money;
use shared::error::ErrorCode;
use shared::models::{OrderItem, OrderItemCreate, OrderItemQuery, OrderItemUpdate};
use sqlx::{SqliteConnection, SqlitePool};

pub async fn find_all(pool: &SqlitePool, query: &OrderItemQuery) -> RepoResult<Vec<OrderItem>> {
    let sql = format!("{ITEM_SELECT} WHERE (?1 IS NULL OR i.order_id = ?1) ORDER BY i.order_id, i.id");
    let mut items = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(query.order_id)
        .fetch_all(pool)
        .await?;
    for item in &mut items {
        item.line_total = money::line_total(item.price, item.quantity);
    }
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderItem>> {
    let mut conn = pool.acquire().await?;
    fetch(&mut conn, id).await
}

async fn fetch(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<OrderItem>> {
    let sql = format!("{ITEM_SELECT} WHERE i.id = ?");
    let item = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(item.map(|mut item| {
        item.line_total = money::line_total(item.price, item.quantity);
        item
    }))
}

async fn load(conn: &mut SqliteConnection, id: i64) -> RepoResult<OrderItem> {
    fetch(conn, id).await?.ok_or_else(|| {
        RepoError::business(
            ErrorCode::OrderItemNotFound,
            format!("Order item {id} not found"),
        )
    })
}

pub async fn create(pool: &SqlitePool, data: OrderItemCreate) -> RepoResult<OrderItem> {
    let mut tx = pool.begin().await?;
    let parent = order::load(&mut tx, data.order_id).await?;
    order::ensure_mutable(&parent)?;

    let price = order::resolve_price(&mut tx, data.menu_id, data.price).await?;
    let id = order::insert_item(&mut tx, data.order_id, data.menu_id, data.quantity, price).await?;
    order::touch(&mut tx, &parent).await?;

    let item = load(&mut tx, id).await?;
    tx.commit().await?;
    Ok(item)
}

pub async fn update(pool: &SqlitePool, id: i64, data: OrderItemUpdate) -> RepoResult<OrderItem> {
    let mut tx = pool.begin().await?;
    let existing = load(&mut tx, id).await?;
    let parent = order::load(&mut tx, existing.order_id).await?;
    order::ensure_mutable(&parent)?;

    sqlx::query(
        "UPDATE order_item SET quantity = COALESCE(?1, quantity), price = COALESCE(?2, price) \
         WHERE id = ?3",
    )
    .bind(data.quantity)
    .bind(data.price.map(money::round_money))
    .bind(id)
    .execute(&mut *tx)
    .await?;
    order::touch(&mut tx, &parent).await?;

    let item = load(&mut tx, id).await?;
    tx.commit().await?;
    Ok(item)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;
    let existing = load(&mut tx, id).await?;
    let parent = order::load(&mut tx, existing.order_id).await?;
    order::ensure_mutable(&parent)?;
    if order::count_items(&mut tx, existing.order_id).await? <= 1 {
        return Err(RepoError::business(
            ErrorCode::OrderEmpty,
            format!(
                "Item {id} is the last line of order {}; cancel the order instead",
                existing.order_id
            ),
        ));
    }

    sqlx::query("DELETE FROM order_item WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    order::touch(&mut tx, &parent).await?;
    tx.commit().await?;
    Ok(true)
}
