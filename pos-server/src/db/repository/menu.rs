//! Menu Repository

use super::{RepoError, RepoResult, category, duplicate_as};
use shared::error::ErrorCode;
use shared::models::{Menu, MenuCreate, MenuQuery, MenuUpdate};
use sqlx::SqlitePool;

const SELECT: &str = "SELECT m.id, m.category_id, c.name AS category_name, m.name, m.description, \
     m.image_url, m.price, m.status, m.created_at \
     FROM menu m LEFT JOIN category c ON c.id = m.category_id";

pub async fn find_all(pool: &SqlitePool, query: &MenuQuery) -> RepoResult<Vec<Menu>> {
    let sql = format!(
        "{SELECT} WHERE (?1 IS NULL OR m.name = ?1) AND (?2 IS NULL OR m.category_id = ?2) \
         AND (?3 IS NULL OR m.status = ?3) ORDER BY c.name, m.name"
    );
    let menus = sqlx::query_as::<_, Menu>(&sql)
        .bind(query.name.as_deref().map(str::trim))
        .bind(query.category_id)
        .bind(query.status)
        .fetch_all(pool)
        .await?;
    Ok(menus)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Menu>> {
    let sql = format!("{SELECT} WHERE m.id = ?");
    let menu = sqlx::query_as::<_, Menu>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(menu)
}

async fn require_category(pool: &SqlitePool, category_id: i64) -> RepoResult<()> {
    if category::find_by_id(pool, category_id).await?.is_none() {
        return Err(RepoError::business(
            ErrorCode::CategoryNotFound,
            format!("Category {category_id} not found"),
        ));
    }
    Ok(())
}

pub async fn create(pool: &SqlitePool, data: MenuCreate) -> RepoResult<Menu> {
    require_category(pool, data.category_id).await?;

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let name = data.name.trim().to_string();

    sqlx::query(
        "INSERT INTO menu (id, category_id, name, description, image_url, price, status, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(id)
    .bind(data.category_id)
    .bind(&name)
    .bind(data.description)
    .bind(data.image_url)
    .bind(data.price)
    .bind(data.status)
    .bind(now)
    .execute(pool)
    .await
    .map_err(duplicate_as(
        ErrorCode::MenuNameExists,
        format!("Menu item '{name}' already exists"),
    ))?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: MenuUpdate) -> RepoResult<Menu> {
    if let Some(category_id) = data.category_id {
        require_category(pool, category_id).await?;
    }

    let name = data.name.as_deref().map(str::trim);
    let rows = sqlx::query(
        "UPDATE menu SET category_id = COALESCE(?1, category_id), name = COALESCE(?2, name), \
         description = COALESCE(?3, description), image_url = COALESCE(?4, image_url), \
         price = COALESCE(?5, price), status = COALESCE(?6, status) WHERE id = ?7",
    )
    .bind(data.category_id)
    .bind(name)
    .bind(data.description.as_deref())
    .bind(data.image_url.as_deref())
    .bind(data.price)
    .bind(data.status)
    .bind(id)
    .execute(pool)
    .await
    .map_err(duplicate_as(
        ErrorCode::MenuNameExists,
        format!("Menu item '{}' already exists", name.unwrap_or_default()),
    ))?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let used: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_item WHERE menu_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if used > 0 {
        return Err(RepoError::business(
            ErrorCode::MenuInUse,
            format!("Menu item {id} is referenced by {used} order line(s)"),
        ));
    }
    let rows = sqlx::query("DELETE FROM menu WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    Ok(true)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu")
        .fetch_one(pool)
        .await?;
    Ok(n)
}
