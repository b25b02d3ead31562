//! Order Repository
//!
//! Every write runs inside a single transaction; helpers that other
//! repositories share take a `&mut SqliteConnection` so they work on both a
//! pooled connection and an open transaction.

use super::{RepoError, RepoResult, bill};
use crate::money;
use shared::error::ErrorCode;
use shared::models::{
    Availability, Bill, Order, OrderCreate, OrderDetail, OrderItem, OrderItemInput, OrderQuery,
    OrderStatus, OrderSummary, OrderUpdate, PayOrderRequest, PaymentReceipt, PaymentStatus,
};
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, table_id, user_id, status, order_time, updated_at";

const SUMMARY: &str = "SELECT o.id, o.table_id, t.table_number, o.user_id, o.status, \
     o.order_time, o.updated_at, COUNT(i.id) AS item_count, \
     COALESCE(SUM(i.quantity * i.price), 0.0) AS total_amount \
     FROM orders o \
     LEFT JOIN dining_table t ON t.id = o.table_id \
     LEFT JOIN order_item i ON i.order_id = o.id";

pub(crate) const ITEM_SELECT: &str = "SELECT i.id, i.order_id, i.menu_id, m.name AS menu_name, \
     i.quantity, i.price FROM order_item i LEFT JOIN menu m ON m.id = i.menu_id";

// =============================================================================
// Queries
// =============================================================================

pub async fn find_all(pool: &SqlitePool, query: &OrderQuery) -> RepoResult<Vec<OrderSummary>> {
    let sql = format!(
        "{SUMMARY} WHERE (?1 IS NULL OR o.status = ?1) AND (?2 IS NULL OR o.table_id = ?2) \
         GROUP BY o.id ORDER BY o.order_time DESC"
    );
    let mut orders = sqlx::query_as::<_, OrderSummary>(&sql)
        .bind(query.status)
        .bind(query.table_id)
        .fetch_all(pool)
        .await?;
    for order in &mut orders {
        order.total_amount = money::round_money(order.total_amount);
    }
    Ok(orders)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("SELECT {COLUMNS} FROM orders WHERE id = ?");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderDetail>> {
    let mut conn = pool.acquire().await?;
    let Some(order) = fetch(&mut conn, id).await? else {
        return Ok(None);
    };
    Ok(Some(detail_of(&mut conn, order).await?))
}

// =============================================================================
// Writes
// =============================================================================

/// Open a new order on a table with its initial lines
pub async fn create(pool: &SqlitePool, data: OrderCreate, user_id: i64) -> RepoResult<OrderDetail> {
    match data.status {
        None | Some(OrderStatus::Pending) => {}
        Some(other) => {
            return Err(RepoError::business(
                ErrorCode::OrderInvalidStatusTransition,
                format!("New orders start as pending, got '{other}'"),
            ));
        }
    }
    if data.order_items.is_empty() {
        return Err(RepoError::business(
            ErrorCode::OrderEmpty,
            "Order must contain at least one item",
        ));
    }

    let mut tx = pool.begin().await?;
    require_table(&mut tx, data.table_id).await?;

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO orders (id, table_id, user_id, status, order_time, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
    )
    .bind(id)
    .bind(data.table_id)
    .bind(data.user_id.unwrap_or(user_id))
    .bind(OrderStatus::Pending)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    insert_items(&mut tx, id, &data.order_items).await?;

    let order = load(&mut tx, id).await?;
    let detail = detail_of(&mut tx, order).await?;
    tx.commit().await?;
    Ok(detail)
}

/// Partial update; `order_items` replaces every line
pub async fn update(pool: &SqlitePool, id: i64, data: OrderUpdate) -> RepoResult<OrderDetail> {
    let mut tx = pool.begin().await?;
    let order = load(&mut tx, id).await?;

    // Re-confirming payment of an order a bill already settled
    let confirms_paid = data.status == Some(OrderStatus::Paid)
        && data.table_id.is_none()
        && data.user_id.is_none()
        && data.order_items.is_none();
    if order.status == OrderStatus::Paid && confirms_paid {
        return detail_of(&mut tx, order).await;
    }
    ensure_mutable(&order)?;

    if let Some(table_id) = data.table_id
        && table_id != order.table_id
    {
        require_table(&mut tx, table_id).await?;
    }

    let mut next = data.status.unwrap_or(order.status);
    if let Some(items) = &data.order_items {
        if items.is_empty() {
            return Err(RepoError::business(
                ErrorCode::OrderEmpty,
                "Order must contain at least one item",
            ));
        }
        sqlx::query("DELETE FROM order_item WHERE order_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_items(&mut tx, id, items).await?;
        if next == OrderStatus::Pending {
            next = OrderStatus::Updated;
        }
    }

    if next != order.status {
        if !order.status.can_transition_to(next) {
            return Err(RepoError::business(
                ErrorCode::OrderInvalidStatusTransition,
                format!("Cannot move order from '{}' to '{next}'", order.status),
            ));
        }
        if next == OrderStatus::Paid {
            let paid = bill::find_by_order(&mut tx, id)
                .await?
                .is_some_and(|b| b.payment_status == PaymentStatus::Paid);
            if !paid {
                return Err(RepoError::business(
                    ErrorCode::OrderBillRequired,
                    format!("Order {id} has no paid bill"),
                ));
            }
        }
    }

    sqlx::query(
        "UPDATE orders SET table_id = COALESCE(?1, table_id), user_id = COALESCE(?2, user_id), \
         status = ?3, updated_at = ?4 WHERE id = ?5",
    )
    .bind(data.table_id)
    .bind(data.user_id)
    .bind(next)
    .bind(shared::util::now_millis())
    .bind(id)
    .execute(&mut *tx)
    .await?;

    let order = load(&mut tx, id).await?;
    let detail = detail_of(&mut tx, order).await?;
    tx.commit().await?;
    Ok(detail)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;
    let order = load(&mut tx, id).await?;
    if order.status == OrderStatus::Paid {
        return Err(RepoError::business(
            ErrorCode::OrderAlreadyPaid,
            format!("Order {id} is paid and cannot be deleted"),
        ));
    }
    sqlx::query("DELETE FROM orders WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(true)
}

/// Settle an order in one step: paid bill with change, order marked paid
pub async fn pay(pool: &SqlitePool, id: i64, req: PayOrderRequest) -> RepoResult<PaymentReceipt> {
    let mut tx = pool.begin().await?;
    let order = load(&mut tx, id).await?;
    ensure_mutable(&order)?;
    ensure_has_items(&mut tx, id).await?;

    let total = total_of(&mut tx, id).await?;
    if !money::is_payment_sufficient(req.received_amount, total) {
        return Err(RepoError::business(
            ErrorCode::PaymentInsufficientAmount,
            format!(
                "Received {:.2} is less than the order total {:.2}",
                req.received_amount, total
            ),
        ));
    }

    let now = shared::util::now_millis();
    let change = money::change_due(req.received_amount, total);
    let received = money::round_money(req.received_amount);

    let bill: Bill = match bill::find_by_order(&mut tx, id).await? {
        Some(existing) if existing.payment_status == PaymentStatus::Paid => {
            return Err(RepoError::business(
                ErrorCode::BillAlreadyPaid,
                format!("Order {id} already has a paid bill"),
            ));
        }
        Some(existing) => {
            sqlx::query(
                "UPDATE bill SET total_amount = ?1, payment_status = ?2, payment_method = ?3, \
                 received_amount = ?4, change_amount = ?5, payment_time = ?6 WHERE id = ?7",
            )
            .bind(total)
            .bind(PaymentStatus::Paid)
            .bind(req.payment_method)
            .bind(received)
            .bind(change)
            .bind(now)
            .bind(existing.id)
            .execute(&mut *tx)
            .await?;
            bill::load(&mut tx, existing.id).await?
        }
        None => {
            let bill_id = shared::util::snowflake_id();
            sqlx::query(
                "INSERT INTO bill (id, order_id, total_amount, payment_status, payment_method, \
                 received_amount, change_amount, payment_time, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
            )
            .bind(bill_id)
            .bind(id)
            .bind(total)
            .bind(PaymentStatus::Paid)
            .bind(req.payment_method)
            .bind(received)
            .bind(change)
            .bind(now)
            .execute(&mut *tx)
            .await?;
            bill::load(&mut tx, bill_id).await?
        }
    };

    set_status(&mut tx, id, OrderStatus::Paid).await?;
    let order = load(&mut tx, id).await?;
    let detail = detail_of(&mut tx, order).await?;
    tx.commit().await?;

    tracing::info!(order_id = id, total, change, method = %req.payment_method.as_str(), "Order paid");
    Ok(PaymentReceipt {
        bill,
        order: detail,
    })
}

// =============================================================================
// Shared helpers
// =============================================================================

pub(crate) async fn fetch(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("SELECT {COLUMNS} FROM orders WHERE id = ?");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(order)
}

/// Load an order or fail with `OrderNotFound`
pub(crate) async fn load(conn: &mut SqliteConnection, id: i64) -> RepoResult<Order> {
    fetch(conn, id).await?.ok_or_else(|| {
        RepoError::business(ErrorCode::OrderNotFound, format!("Order {id} not found"))
    })
}

/// Paid and cancelled orders reject every change
pub(crate) fn ensure_mutable(order: &Order) -> RepoResult<()> {
    match order.status {
        OrderStatus::Paid => Err(RepoError::business(
            ErrorCode::OrderAlreadyPaid,
            format!("Order {} is already paid", order.id),
        )),
        OrderStatus::Cancelled => Err(RepoError::business(
            ErrorCode::OrderCancelled,
            format!("Order {} is cancelled", order.id),
        )),
        _ => Ok(()),
    }
}

pub(crate) async fn set_status(
    conn: &mut SqliteConnection,
    id: i64,
    status: OrderStatus,
) -> RepoResult<()> {
    sqlx::query("UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(status)
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Record that an order's lines changed: pending becomes updated
pub(crate) async fn touch(conn: &mut SqliteConnection, order: &Order) -> RepoResult<()> {
    let next = match order.status {
        OrderStatus::Pending => OrderStatus::Updated,
        other => other,
    };
    set_status(conn, order.id, next).await
}

pub(crate) async fn items_of(conn: &mut SqliteConnection, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let sql = format!("{ITEM_SELECT} WHERE i.order_id = ? ORDER BY i.id");
    let mut items = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(order_id)
        .fetch_all(&mut *conn)
        .await?;
    for item in &mut items {
        item.line_total = money::line_total(item.price, item.quantity);
    }
    Ok(items)
}

pub(crate) async fn count_items(conn: &mut SqliteConnection, order_id: i64) -> RepoResult<i64> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_item WHERE order_id = ?")
        .bind(order_id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(n)
}

/// An order without lines cannot be settled
pub(crate) async fn ensure_has_items(conn: &mut SqliteConnection, order_id: i64) -> RepoResult<()> {
    if count_items(conn, order_id).await? == 0 {
        return Err(RepoError::business(
            ErrorCode::OrderEmpty,
            format!("Order {order_id} has no items"),
        ));
    }
    Ok(())
}

/// Current total of an order's lines
pub(crate) async fn total_of(conn: &mut SqliteConnection, order_id: i64) -> RepoResult<f64> {
    let lines: Vec<(f64, i64)> =
        sqlx::query_as("SELECT price, quantity FROM order_item WHERE order_id = ?")
            .bind(order_id)
            .fetch_all(&mut *conn)
            .await?;
    Ok(money::order_total(lines))
}

async fn detail_of(conn: &mut SqliteConnection, order: Order) -> RepoResult<OrderDetail> {
    let items = items_of(conn, order.id).await?;
    let total_amount = money::order_total(items.iter().map(|i| (i.price, i.quantity)));
    let table_number: Option<String> =
        sqlx::query_scalar("SELECT table_number FROM dining_table WHERE id = ?")
            .bind(order.table_id)
            .fetch_optional(&mut *conn)
            .await?;
    Ok(OrderDetail {
        order,
        table_number,
        items,
        total_amount,
    })
}

/// Table must exist and be available for service
async fn require_table(conn: &mut SqliteConnection, table_id: i64) -> RepoResult<()> {
    let status: Option<Availability> =
        sqlx::query_scalar("SELECT status FROM dining_table WHERE id = ?")
            .bind(table_id)
            .fetch_optional(&mut *conn)
            .await?;
    match status {
        None => Err(RepoError::business(
            ErrorCode::TableNotFound,
            format!("Table {table_id} not found"),
        )),
        Some(Availability::Unavailable) => Err(RepoError::business(
            ErrorCode::TableUnavailable,
            format!("Table {table_id} is unavailable"),
        )),
        Some(Availability::Available) => Ok(()),
    }
}

/// Resolve the unit price of a line: explicit price or the menu's current one
pub(crate) async fn resolve_price(
    conn: &mut SqliteConnection,
    menu_id: i64,
    price: Option<f64>,
) -> RepoResult<f64> {
    let menu: Option<(f64, Availability)> =
        sqlx::query_as("SELECT price, status FROM menu WHERE id = ?")
            .bind(menu_id)
            .fetch_optional(&mut *conn)
            .await?;
    match menu {
        None => Err(RepoError::business(
            ErrorCode::MenuNotFound,
            format!("Menu item {menu_id} not found"),
        )),
        Some((_, Availability::Unavailable)) => Err(RepoError::business(
            ErrorCode::MenuUnavailable,
            format!("Menu item {menu_id} is unavailable"),
        )),
        Some((menu_price, Availability::Available)) => {
            Ok(money::round_money(price.unwrap_or(menu_price)))
        }
    }
}

pub(crate) async fn insert_item(
    conn: &mut SqliteConnection,
    order_id: i64,
    menu_id: i64,
    quantity: i64,
    price: f64,
) -> RepoResult<i64> {
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO order_item (id, order_id, menu_id, quantity, price) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(order_id)
    .bind(menu_id)
    .bind(quantity)
    .bind(price)
    .execute(&mut *conn)
    .await?;
    Ok(id)
}

async fn insert_items(
    conn: &mut SqliteConnection,
    order_id: i64,
    items: &[OrderItemInput],
) -> RepoResult<()> {
    for item in items {
        let price = resolve_price(conn, item.menu_id, item.price).await?;
        insert_item(conn, order_id, item.menu_id, item.quantity, price).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{category, dining_table, menu, test_support, user, zone};
    use shared::models::{
        CategoryCreate, DiningTableCreate, MenuCreate, PaymentMethod, Role, UserCreate, ZoneCreate,
    };

    struct Fixture {
        pool: SqlitePool,
        user_id: i64,
        table_id: i64,
        noodles: i64,
        tea: i64,
    }

    async fn fixture() -> Fixture {
        let pool = test_support::pool().await;
        let user_id = user::create(
            &pool,
            UserCreate {
                first_name: "Cathy".into(),
                last_name: "Cashier".into(),
                email: None,
                phone: None,
                username: "cathy".into(),
                password: "secret123".into(),
                role: Role::Cashier,
            },
        )
        .await
        .unwrap()
        .id;
        let zone_id = zone::create(
            &pool,
            ZoneCreate {
                name: "Hall".into(),
                status: Availability::Available,
            },
        )
        .await
        .unwrap()
        .id;
        let table_id = dining_table::create(
            &pool,
            DiningTableCreate {
                table_number: "A1".into(),
                zone_id,
                status: Availability::Available,
            },
        )
        .await
        .unwrap()
        .id;
        let category_id = category::create(
            &pool,
            CategoryCreate {
                name: "Kitchen".into(),
                status: Availability::Available,
            },
        )
        .await
        .unwrap()
        .id;
        let noodles = add_menu(&pool, category_id, "Noodles", 12.5).await;
        let tea = add_menu(&pool, category_id, "Tea", 2.25).await;
        Fixture {
            pool,
            user_id,
            table_id,
            noodles,
            tea,
        }
    }

    async fn add_menu(pool: &SqlitePool, category_id: i64, name: &str, price: f64) -> i64 {
        menu::create(
            pool,
            MenuCreate {
                category_id,
                name: name.into(),
                description: None,
                image_url: None,
                price,
                status: Availability::Available,
            },
        )
        .await
        .unwrap()
        .id
    }

    fn line(menu_id: i64, quantity: i64, price: Option<f64>) -> OrderItemInput {
        OrderItemInput {
            menu_id,
            quantity,
            price,
        }
    }

    async fn open_order(f: &Fixture) -> OrderDetail {
        create(
            &f.pool,
            OrderCreate {
                table_id: f.table_id,
                user_id: None,
                status: None,
                order_items: vec![line(f.noodles, 2, None), line(f.tea, 3, Some(2.0))],
            },
            f.user_id,
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_defaults_price_and_user() {
        let f = fixture().await;
        let detail = open_order(&f).await;

        assert_eq!(detail.order.status, OrderStatus::Pending);
        assert_eq!(detail.order.user_id, f.user_id);
        assert_eq!(detail.table_number.as_deref(), Some("A1"));
        assert_eq!(detail.items.len(), 2);
        let noodles = detail.items.iter().find(|i| i.menu_id == f.noodles).unwrap();
        assert_eq!(noodles.price, 12.5);
        assert_eq!(noodles.line_total, 25.0);
        assert_eq!(noodles.menu_name.as_deref(), Some("Noodles"));
        assert_eq!(detail.total_amount, 31.0);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_and_unknown_table() {
        let f = fixture().await;
        let err = create(
            &f.pool,
            OrderCreate {
                table_id: f.table_id,
                user_id: None,
                status: None,
                order_items: vec![],
            },
            f.user_id,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::OrderEmpty, _)));

        let err = create(
            &f.pool,
            OrderCreate {
                table_id: 1,
                user_id: None,
                status: None,
                order_items: vec![line(f.tea, 1, None)],
            },
            f.user_id,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::TableNotFound, _)));
    }

    #[tokio::test]
    async fn test_create_is_atomic_on_bad_menu() {
        let f = fixture().await;
        let err = create(
            &f.pool,
            OrderCreate {
                table_id: f.table_id,
                user_id: None,
                status: None,
                order_items: vec![line(f.tea, 1, None), line(777, 1, None)],
            },
            f.user_id,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::MenuNotFound, _)));
        assert!(find_all(&f.pool, &OrderQuery::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_items_moves_to_updated() {
        let f = fixture().await;
        let detail = open_order(&f).await;

        let updated = update(
            &f.pool,
            detail.order.id,
            OrderUpdate {
                order_items: Some(vec![line(f.tea, 1, None)]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.order.status, OrderStatus::Updated);
        assert_eq!(updated.items.len(), 1);
        assert_eq!(updated.total_amount, 2.25);

        let summaries = find_all(&f.pool, &OrderQuery::default()).await.unwrap();
        assert_eq!(summaries[0].item_count, 1);
        assert_eq!(summaries[0].total_amount, 2.25);
    }

    #[tokio::test]
    async fn test_patch_to_paid_requires_bill() {
        let f = fixture().await;
        let detail = open_order(&f).await;
        let err = update(
            &f.pool,
            detail.order.id,
            OrderUpdate {
                status: Some(OrderStatus::Paid),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::OrderBillRequired, _)));
    }

    #[tokio::test]
    async fn test_pay_creates_bill_and_locks_order() {
        let f = fixture().await;
        let detail = open_order(&f).await;

        let short = pay(
            &f.pool,
            detail.order.id,
            PayOrderRequest {
                received_amount: 30.0,
                payment_method: PaymentMethod::Cash,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(
            short,
            RepoError::Business(ErrorCode::PaymentInsufficientAmount, _)
        ));

        let receipt = pay(
            &f.pool,
            detail.order.id,
            PayOrderRequest {
                received_amount: 50.0,
                payment_method: PaymentMethod::Cash,
            },
        )
        .await
        .unwrap();
        assert_eq!(receipt.order.order.status, OrderStatus::Paid);
        assert_eq!(receipt.bill.payment_status, PaymentStatus::Paid);
        assert_eq!(receipt.bill.total_amount, 31.0);
        assert_eq!(receipt.bill.change_amount, Some(19.0));
        assert!(receipt.bill.payment_time.is_some());

        let err = update(
            &f.pool,
            detail.order.id,
            OrderUpdate {
                status: Some(OrderStatus::Cancelled),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::OrderAlreadyPaid, _)));

        let err = delete(&f.pool, detail.order.id).await.unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::OrderAlreadyPaid, _)));
    }

    #[tokio::test]
    async fn test_order_without_lines_cannot_be_paid() {
        let f = fixture().await;
        let detail = open_order(&f).await;
        sqlx::query("DELETE FROM order_item WHERE order_id = ?")
            .bind(detail.order.id)
            .execute(&f.pool)
            .await
            .unwrap();

        let err = pay(
            &f.pool,
            detail.order.id,
            PayOrderRequest {
                received_amount: 0.0,
                payment_method: PaymentMethod::Cash,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::OrderEmpty, _)));

        let order = find_by_id(&f.pool, detail.order.id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_cancel_then_delete() {
        let f = fixture().await;
        let detail = open_order(&f).await;
        let cancelled = update(
            &f.pool,
            detail.order.id,
            OrderUpdate {
                status: Some(OrderStatus::Cancelled),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(cancelled.order.status, OrderStatus::Cancelled);

        assert!(delete(&f.pool, detail.order.id).await.unwrap());
        assert!(find_detail(&f.pool, detail.order.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_open_order_blocks_table_delete() {
        let f = fixture().await;
        open_order(&f).await;
        let err = dining_table::delete(&f.pool, f.table_id).await.unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::TableHasOpenOrders, _)));
    }
}
