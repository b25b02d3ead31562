//! Dining Table Repository

use super::{RepoError, RepoResult, duplicate_as, zone};
use shared::error::ErrorCode;
use shared::models::{DiningTable, DiningTableCreate, DiningTableQuery, DiningTableUpdate};
use sqlx::SqlitePool;

const SELECT: &str = "SELECT t.id, t.table_number, t.zone_id, z.name AS zone_name, t.status, \
     t.created_at FROM dining_table t LEFT JOIN zone z ON z.id = t.zone_id";

pub async fn find_all(pool: &SqlitePool, query: &DiningTableQuery) -> RepoResult<Vec<DiningTable>> {
    let sql = format!(
        "{SELECT} WHERE (?1 IS NULL OR t.zone_id = ?1) AND (?2 IS NULL OR t.status = ?2) \
         ORDER BY z.name, t.table_number"
    );
    let tables = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(query.zone)
        .bind(query.status)
        .fetch_all(pool)
        .await?;
    Ok(tables)
}

pub async fn find_by_zone(pool: &SqlitePool, zone_id: i64) -> RepoResult<Vec<DiningTable>> {
    let query = DiningTableQuery {
        zone: Some(zone_id),
        status: None,
    };
    find_all(pool, &query).await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiningTable>> {
    let sql = format!("{SELECT} WHERE t.id = ?");
    let table = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(table)
}

async fn require_zone(pool: &SqlitePool, zone_id: i64) -> RepoResult<()> {
    if zone::find_by_id(pool, zone_id).await?.is_none() {
        return Err(RepoError::business(
            ErrorCode::ZoneNotFound,
            format!("Zone {zone_id} not found"),
        ));
    }
    Ok(())
}

pub async fn create(pool: &SqlitePool, data: DiningTableCreate) -> RepoResult<DiningTable> {
    require_zone(pool, data.zone_id).await?;

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let number = data.table_number.trim().to_string();

    sqlx::query(
        "INSERT INTO dining_table (id, table_number, zone_id, status, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(&number)
    .bind(data.zone_id)
    .bind(data.status)
    .bind(now)
    .execute(pool)
    .await
    .map_err(duplicate_as(
        ErrorCode::TableNumberExists,
        format!("Table '{number}' already exists"),
    ))?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create table".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: DiningTableUpdate) -> RepoResult<DiningTable> {
    if let Some(zone_id) = data.zone_id {
        require_zone(pool, zone_id).await?;
    }

    let number = data.table_number.as_deref().map(str::trim);
    let rows = sqlx::query(
        "UPDATE dining_table SET table_number = COALESCE(?1, table_number), \
         zone_id = COALESCE(?2, zone_id), status = COALESCE(?3, status) WHERE id = ?4",
    )
    .bind(number)
    .bind(data.zone_id)
    .bind(data.status)
    .bind(id)
    .execute(pool)
    .await
    .map_err(duplicate_as(
        ErrorCode::TableNumberExists,
        format!("Table '{}' already exists", number.unwrap_or_default()),
    ))?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let open: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM orders WHERE table_id = ? AND status IN ('pending', 'updated')",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    if open > 0 {
        return Err(RepoError::business(
            ErrorCode::TableHasOpenOrders,
            format!("Table {id} has {open} unpaid order(s)"),
        ));
    }
    let history: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE table_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if history > 0 {
        return Err(RepoError::business(
            ErrorCode::TableHasOpenOrders,
            format!("Table {id} is referenced by {history} past order(s); mark it unavailable instead"),
        ));
    }
    let rows = sqlx::query("DELETE FROM dining_table WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }
    Ok(true)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dining_table")
        .fetch_one(pool)
        .await?;
    Ok(n)
}
