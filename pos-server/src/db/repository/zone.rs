//! Zone Repository

use super::{RepoError, RepoResult, duplicate_as};
use shared::error::ErrorCode;
use shared::models::{Zone, ZoneCreate, ZoneUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, status, created_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Zone>> {
    let sql = format!("SELECT {COLUMNS} FROM zone ORDER BY name");
    let zones = sqlx::query_as::<_, Zone>(&sql).fetch_all(pool).await?;
    Ok(zones)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Zone>> {
    let sql = format!("SELECT {COLUMNS} FROM zone WHERE id = ?");
    let zone = sqlx::query_as::<_, Zone>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(zone)
}

pub async fn create(pool: &SqlitePool, data: ZoneCreate) -> RepoResult<Zone> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let name = data.name.trim().to_string();

    sqlx::query("INSERT INTO zone (id, name, status, created_at) VALUES (?1, ?2, ?3, ?4)")
        .bind(id)
        .bind(&name)
        .bind(data.status)
        .bind(now)
        .execute(pool)
        .await
        .map_err(duplicate_as(
            ErrorCode::ZoneNameExists,
            format!("Zone '{name}' already exists"),
        ))?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create zone".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ZoneUpdate) -> RepoResult<Zone> {
    let name = data.name.as_deref().map(str::trim);
    let rows = sqlx::query(
        "UPDATE zone SET name = COALESCE(?1, name), status = COALESCE(?2, status) WHERE id = ?3",
    )
    .bind(name)
    .bind(data.status)
    .bind(id)
    .execute(pool)
    .await
    .map_err(duplicate_as(
        ErrorCode::ZoneNameExists,
        format!("Zone '{}' already exists", name.unwrap_or_default()),
    ))?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Zone {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Zone {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let tables: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dining_table WHERE zone_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if tables > 0 {
        return Err(RepoError::business(
            ErrorCode::ZoneHasTables,
            format!("Cannot delete zone with {tables} table(s)"),
        ));
    }
    let rows = sqlx::query("DELETE FROM zone WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Zone {id} not found")));
    }
    Ok(true)
}
