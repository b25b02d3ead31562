//! Bill Repository
//!
//! One bill per order. A bill that becomes paid settles its order inside the
//! same transaction.

use super::order;
use super::{RepoError, RepoResult, duplicate_as};
use crate::money;
use shared::error::ErrorCode;
use shared::models::{Bill, BillCreate, BillQuery, BillUpdate, OrderStatus, PaymentStatus};
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, order_id, total_amount, payment_status, payment_method, \
     received_amount, change_amount, payment_time, created_at";

pub async fn find_all(pool: &SqlitePool, query: &BillQuery) -> RepoResult<Vec<Bill>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM bill WHERE (?1 IS NULL OR order_id = ?1) \
         AND (?2 IS NULL OR payment_status = ?2) ORDER BY created_at DESC"
    );
    let bills = sqlx::query_as::<_, Bill>(&sql)
        .bind(query.order_id)
        .bind(query.payment_status)
        .fetch_all(pool)
        .await?;
    Ok(bills)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Bill>> {
    let mut conn = pool.acquire().await?;
    fetch(&mut conn, id).await
}

async fn fetch(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Bill>> {
    let sql = format!("SELECT {COLUMNS} FROM bill WHERE id = ?");
    let bill = sqlx::query_as::<_, Bill>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(bill)
}

pub(crate) async fn load(conn: &mut SqliteConnection, id: i64) -> RepoResult<Bill> {
    fetch(conn, id)
        .await?
        .ok_or_else(|| RepoError::business(ErrorCode::BillNotFound, format!("Bill {id} not found")))
}

pub(crate) async fn find_by_order(
    conn: &mut SqliteConnection,
    order_id: i64,
) -> RepoResult<Option<Bill>> {
    let sql = format!("SELECT {COLUMNS} FROM bill WHERE order_id = ?");
    let bill = sqlx::query_as::<_, Bill>(&sql)
        .bind(order_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(bill)
}

/// Payment figures for a bill that is being settled
struct Settlement {
    received: Option<f64>,
    change: Option<f64>,
    time: i64,
}

fn settle(total: f64, received: Option<f64>, time: Option<i64>) -> RepoResult<Settlement> {
    let change = match received {
        Some(received) if !money::is_payment_sufficient(received, total) => {
            return Err(RepoError::business(
                ErrorCode::PaymentInsufficientAmount,
                format!("Received {received:.2} is less than the bill total {total:.2}"),
            ));
        }
        Some(received) => Some(money::change_due(received, total)),
        None => None,
    };
    Ok(Settlement {
        received: received.map(money::round_money),
        change,
        time: time.unwrap_or_else(shared::util::now_millis),
    })
}

pub async fn create(pool: &SqlitePool, data: BillCreate) -> RepoResult<Bill> {
    let mut tx = pool.begin().await?;
    let parent = order::load(&mut tx, data.order_id).await?;
    if find_by_order(&mut tx, data.order_id).await?.is_some() {
        return Err(RepoError::business(
            ErrorCode::BillAlreadyExists,
            format!("Order {} already has a bill", data.order_id),
        ));
    }
    order::ensure_mutable(&parent)?;

    let total = match data.total_amount {
        Some(amount) => money::round_money(amount),
        None => order::total_of(&mut tx, data.order_id).await?,
    };

    let (received, change, payment_time) = match data.payment_status {
        PaymentStatus::Paid => {
            order::ensure_has_items(&mut tx, data.order_id).await?;
            let s = settle(total, data.received_amount, data.payment_time)?;
            (s.received, s.change, Some(s.time))
        }
        PaymentStatus::Pending => (
            data.received_amount.map(money::round_money),
            None,
            data.payment_time,
        ),
    };

    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO bill (id, order_id, total_amount, payment_status, payment_method, \
         received_amount, change_amount, payment_time, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(id)
    .bind(data.order_id)
    .bind(total)
    .bind(data.payment_status)
    .bind(data.payment_method)
    .bind(received)
    .bind(change)
    .bind(payment_time)
    .bind(shared::util::now_millis())
    .execute(&mut *tx)
    .await
    .map_err(duplicate_as(
        ErrorCode::BillAlreadyExists,
        format!("Order {} already has a bill", data.order_id),
    ))?;

    if data.payment_status == PaymentStatus::Paid {
        order::set_status(&mut tx, data.order_id, OrderStatus::Paid).await?;
    }

    let bill = load(&mut tx, id).await?;
    tx.commit().await?;
    Ok(bill)
}

pub async fn update(pool: &SqlitePool, id: i64, data: BillUpdate) -> RepoResult<Bill> {
    let mut tx = pool.begin().await?;
    let existing = load(&mut tx, id).await?;
    if existing.payment_status == PaymentStatus::Paid {
        return Err(RepoError::business(
            ErrorCode::BillAlreadyPaid,
            format!("Bill {id} is already paid"),
        ));
    }

    let status = data.payment_status.unwrap_or(existing.payment_status);
    let method = data.payment_method.or(existing.payment_method);
    let received = data.received_amount.or(existing.received_amount);

    // Lines may have changed since the bill was opened; settle the live total
    let total = match (data.total_amount, status) {
        (Some(amount), _) => money::round_money(amount),
        (None, PaymentStatus::Paid) => order::total_of(&mut tx, existing.order_id).await?,
        (None, PaymentStatus::Pending) => existing.total_amount,
    };

    let (received, change, payment_time) = match status {
        PaymentStatus::Paid => {
            let parent = order::load(&mut tx, existing.order_id).await?;
            order::ensure_mutable(&parent)?;
            order::ensure_has_items(&mut tx, existing.order_id).await?;
            let s = settle(total, received, data.payment_time.or(existing.payment_time))?;
            (s.received, s.change, Some(s.time))
        }
        PaymentStatus::Pending => (
            received.map(money::round_money),
            None,
            data.payment_time.or(existing.payment_time),
        ),
    };

    sqlx::query(
        "UPDATE bill SET total_amount = ?1, payment_status = ?2, payment_method = ?3, \
         received_amount = ?4, change_amount = ?5, payment_time = ?6 WHERE id = ?7",
    )
    .bind(total)
    .bind(status)
    .bind(method)
    .bind(received)
    .bind(change)
    .bind(payment_time)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if status == PaymentStatus::Paid {
        order::set_status(&mut tx, existing.order_id, OrderStatus::Paid).await?;
    }

    let bill = load(&mut tx, id).await?;
    tx.commit().await?;
    Ok(bill)
}

/// Delete a bill; voiding a paid bill reopens its order as `updated`
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;
    let existing = load(&mut tx, id).await?;

    sqlx::query("DELETE FROM bill WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if existing.payment_status == PaymentStatus::Paid {
        order::set_status(&mut tx, existing.order_id, OrderStatus::Updated).await?;
        tracing::warn!(bill_id = id, order_id = existing.order_id, "Paid bill voided");
    }
    tx.commit().await?;
    Ok(true)
}
