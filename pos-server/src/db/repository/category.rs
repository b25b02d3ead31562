//! Category Repository

use super::{RepoError, RepoResult, duplicate_as};
use shared::error::ErrorCode;
use shared::models::{Availability, Category, CategoryCreate, CategoryUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, status, created_at";

pub async fn find_all(pool: &SqlitePool, status: Option<Availability>) -> RepoResult<Vec<Category>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM category WHERE (?1 IS NULL OR status = ?1) ORDER BY name"
    );
    let categories = sqlx::query_as::<_, Category>(&sql)
        .bind(status)
        .fetch_all(pool)
        .await?;
    Ok(categories)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let sql = format!("SELECT {COLUMNS} FROM category WHERE id = ?");
    let category = sqlx::query_as::<_, Category>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(category)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Category>> {
    let sql = format!("SELECT {COLUMNS} FROM category WHERE name = ? LIMIT 1");
    let category = sqlx::query_as::<_, Category>(&sql)
        .bind(name.trim())
        .fetch_optional(pool)
        .await?;
    Ok(category)
}

pub async fn create(pool: &SqlitePool, data: CategoryCreate) -> RepoResult<Category> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let name = data.name.trim().to_string();

    sqlx::query("INSERT INTO category (id, name, status, created_at) VALUES (?1, ?2, ?3, ?4)")
        .bind(id)
        .bind(&name)
        .bind(data.status)
        .bind(now)
        .execute(pool)
        .await
        .map_err(duplicate_as(
            ErrorCode::CategoryNameExists,
            format!("Category '{name}' already exists"),
        ))?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CategoryUpdate) -> RepoResult<Category> {
    let name = data.name.as_deref().map(str::trim);
    let rows = sqlx::query(
        "UPDATE category SET name = COALESCE(?1, name), status = COALESCE(?2, status) WHERE id = ?3",
    )
    .bind(name)
    .bind(data.status)
    .bind(id)
    .execute(pool)
    .await
    .map_err(duplicate_as(
        ErrorCode::CategoryNameExists,
        format!("Category '{}' already exists", name.unwrap_or_default()),
    ))?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let menus: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu WHERE category_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if menus > 0 {
        return Err(RepoError::business(
            ErrorCode::CategoryHasMenus,
            format!("Category {id} still has {menus} menu item(s)"),
        ));
    }
    let rows = sqlx::query("DELETE FROM category WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    Ok(true)
}
