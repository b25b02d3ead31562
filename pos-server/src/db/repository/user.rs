//! User Repository (cashiers and administrators)

use super::{RepoError, RepoResult, duplicate_as};
use shared::error::ErrorCode;
use shared::models::{Role, User, UserCreate, UserUpdate};
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, first_name, last_name, email, phone, username, role, is_active, created_at";

/// Login view of a user, including the password hash
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Credentials {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub hash_pass: String,
    pub role: Role,
    pub is_active: bool,
}

impl Credentials {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> bool {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let Ok(parsed_hash) = PasswordHash::new(&self.hash_pass) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Hash password using argon2
pub fn hash_password(password: &str) -> RepoResult<String> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<User>> {
    let sql = format!("SELECT {COLUMNS} FROM app_user ORDER BY username");
    let users = sqlx::query_as::<_, User>(&sql).fetch_all(pool).await?;
    Ok(users)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let mut conn = pool.acquire().await?;
    fetch(&mut conn, id).await
}

async fn fetch(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<User>> {
    let sql = format!("SELECT {COLUMNS} FROM app_user WHERE id = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(user)
}

async fn load(conn: &mut SqliteConnection, id: i64) -> RepoResult<User> {
    fetch(conn, id)
        .await?
        .ok_or_else(|| RepoError::business(ErrorCode::UserNotFound, format!("User {id} not found")))
}

/// Matches when some other active administrator remains besides `?1`
const OTHER_ADMIN_EXISTS: &str = "EXISTS (SELECT 1 FROM app_user \
     WHERE role = 'admin' AND is_active = 1 AND id != ?1)";

pub async fn find_credentials(pool: &SqlitePool, username: &str) -> RepoResult<Option<Credentials>> {
    let creds = sqlx::query_as::<_, Credentials>(
        "SELECT id, username, first_name, last_name, hash_pass, role, is_active \
         FROM app_user WHERE username = ? LIMIT 1",
    )
    .bind(username.trim())
    .fetch_optional(pool)
    .await?;
    Ok(creds)
}

pub async fn find_credentials_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Credentials>> {
    let creds = sqlx::query_as::<_, Credentials>(
        "SELECT id, username, first_name, last_name, hash_pass, role, is_active \
         FROM app_user WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(creds)
}

pub async fn create(pool: &SqlitePool, data: UserCreate) -> RepoResult<User> {
    let hash_pass = hash_password(&data.password)?;
    let id = shared::util::snowflake_id();
    let username = data.username.trim().to_string();

    sqlx::query(
        "INSERT INTO app_user (id, first_name, last_name, email, phone, username, hash_pass, \
         role, is_active, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1, ?9)",
    )
    .bind(id)
    .bind(data.first_name.trim())
    .bind(data.last_name.trim())
    .bind(data.email)
    .bind(data.phone)
    .bind(&username)
    .bind(hash_pass)
    .bind(data.role)
    .bind(shared::util::now_millis())
    .execute(pool)
    .await
    .map_err(duplicate_as(
        ErrorCode::UsernameExists,
        format!("Username '{username}' already exists"),
    ))?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

/// Partial update
///
/// Demoting or disabling an active admin is refused unless another active
/// admin remains; the check is part of the UPDATE itself so two concurrent
/// demotions cannot both succeed.
pub async fn update(pool: &SqlitePool, id: i64, data: UserUpdate) -> RepoResult<User> {
    let hash_pass = match data.password.as_deref() {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };
    let username = data.username.as_deref().map(str::trim);

    let mut tx = pool.begin().await?;
    let existing = load(&mut tx, id).await?;
    let loses_admin = existing.role == Role::Admin
        && existing.is_active
        && (data.role == Some(Role::Cashier) || data.is_active == Some(false));

    let sql = format!(
        "UPDATE app_user SET first_name = COALESCE(?2, first_name), \
         last_name = COALESCE(?3, last_name), email = COALESCE(?4, email), \
         phone = COALESCE(?5, phone), username = COALESCE(?6, username), \
         hash_pass = COALESCE(?7, hash_pass), role = COALESCE(?8, role), \
         is_active = COALESCE(?9, is_active) \
         WHERE id = ?1 AND (?10 = 0 OR {OTHER_ADMIN_EXISTS})"
    );
    let result = sqlx::query(&sql)
        .bind(id)
        .bind(data.first_name.as_deref().map(str::trim))
        .bind(data.last_name.as_deref().map(str::trim))
        .bind(data.email.as_deref())
        .bind(data.phone.as_deref())
        .bind(username)
        .bind(hash_pass)
        .bind(data.role)
        .bind(data.is_active)
        .bind(loses_admin)
        .execute(&mut *tx)
        .await
        .map_err(duplicate_as(
            ErrorCode::UsernameExists,
            format!("Username '{}' already exists", username.unwrap_or_default()),
        ))?;
    if result.rows_affected() == 0 {
        return Err(RepoError::business(
            ErrorCode::LastAdmin,
            "Cannot demote or disable the last active administrator",
        ));
    }

    let user = load(&mut tx, id).await?;
    tx.commit().await?;
    Ok(user)
}

/// Hard delete a user on behalf of `acting_user_id`
pub async fn delete(pool: &SqlitePool, id: i64, acting_user_id: i64) -> RepoResult<bool> {
    if id == acting_user_id {
        return Err(RepoError::business(
            ErrorCode::CannotDeleteSelf,
            "You cannot delete your own account",
        ));
    }

    let mut tx = pool.begin().await?;
    load(&mut tx, id).await?;

    let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = ?")
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
    if orders > 0 {
        return Err(RepoError::business(
            ErrorCode::ValidationFailed,
            format!("User {id} has taken {orders} order(s); deactivate the account instead"),
        ));
    }

    let sql = format!(
        "DELETE FROM app_user WHERE id = ?1 \
         AND (role != 'admin' OR is_active = 0 OR {OTHER_ADMIN_EXISTS})"
    );
    let result = sqlx::query(&sql).bind(id).execute(&mut *tx).await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::business(
            ErrorCode::LastAdmin,
            "Cannot delete the last active administrator",
        ));
    }
    tx.commit().await?;
    Ok(true)
}

pub async fn change_password(pool: &SqlitePool, id: i64, new_password: &str) -> RepoResult<()> {
    let hash_pass = hash_password(new_password)?;
    let rows = sqlx::query("UPDATE app_user SET hash_pass = ?1 WHERE id = ?2")
        .bind(hash_pass)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::business(
            ErrorCode::UserNotFound,
            format!("User {id} not found"),
        ));
    }
    Ok(())
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM app_user")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

/// Create the first administrator when no user exists yet
///
/// Returns the created user, or `None` when users were already present.
pub async fn ensure_admin(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> RepoResult<Option<User>> {
    if count(pool).await? > 0 {
        return Ok(None);
    }
    let admin = create(
        pool,
        UserCreate {
            first_name: "System".into(),
            last_name: "Administrator".into(),
            email: None,
            phone: None,
            username: username.to_string(),
            password: password.to_string(),
            role: Role::Admin,
        },
    )
    .await?;
    Ok(Some(admin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;

    fn cashier(username: &str) -> UserCreate {
        UserCreate {
            first_name: "Cam".into(),
            last_name: "Cashier".into(),
            email: Some("cam@example.com".into()),
            phone: None,
            username: username.into(),
            password: "hunter22".into(),
            role: Role::Cashier,
        }
    }

    #[tokio::test]
    async fn test_password_hashing_roundtrip() {
        let pool = test_support::pool().await;
        let user = create(&pool, cashier("cam")).await.unwrap();
        assert_eq!(user.role, Role::Cashier);
        assert!(user.is_active);

        let creds = find_credentials(&pool, "cam").await.unwrap().unwrap();
        assert_ne!(creds.hash_pass, "hunter22");
        assert!(creds.verify_password("hunter22"));
        assert!(!creds.verify_password("hunter23"));
        assert_eq!(creds.display_name(), "Cam Cashier");

        change_password(&pool, user.id, "new-secret").await.unwrap();
        let creds = find_credentials_by_id(&pool, user.id).await.unwrap().unwrap();
        assert!(creds.verify_password("new-secret"));
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let pool = test_support::pool().await;
        create(&pool, cashier("cam")).await.unwrap();
        let err = create(&pool, cashier("cam")).await.unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::UsernameExists, _)));
    }

    #[tokio::test]
    async fn test_bootstrap_admin_only_once() {
        let pool = test_support::pool().await;
        let admin = ensure_admin(&pool, "admin", "admin-pass").await.unwrap();
        assert_eq!(admin.map(|u| u.role), Some(Role::Admin));
        assert!(ensure_admin(&pool, "admin", "other").await.unwrap().is_none());
        assert_eq!(count(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_last_admin_is_protected() {
        let pool = test_support::pool().await;
        let admin = ensure_admin(&pool, "admin", "admin-pass")
            .await
            .unwrap()
            .unwrap();
        let clerk = create(&pool, cashier("cam")).await.unwrap();

        let err = update(
            &pool,
            admin.id,
            UserUpdate {
                role: Some(Role::Cashier),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::LastAdmin, _)));

        let err = delete(&pool, admin.id, clerk.id).await.unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::LastAdmin, _)));

        let err = delete(&pool, admin.id, admin.id).await.unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::CannotDeleteSelf, _)));

        assert!(delete(&pool, clerk.id, admin.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_demotions_keep_one_admin() {
        let pool = test_support::pool().await;
        let first = ensure_admin(&pool, "admin", "admin-pass")
            .await
            .unwrap()
            .unwrap();
        let second = create(
            &pool,
            UserCreate {
                role: Role::Admin,
                ..cashier("ada")
            },
        )
        .await
        .unwrap();
        let demote = || UserUpdate {
            role: Some(Role::Cashier),
            ..Default::default()
        };

        let (a, b) = tokio::join!(
            update(&pool, first.id, demote()),
            update(&pool, second.id, demote())
        );
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        let refused = a.err().or(b.err()).unwrap();
        assert!(matches!(refused, RepoError::Business(ErrorCode::LastAdmin, _)));

        let admins = find_all(&pool)
            .await
            .unwrap()
            .into_iter()
            .filter(|u| u.role == Role::Admin && u.is_active)
            .count();
        assert_eq!(admins, 1);
    }

    #[tokio::test]
    async fn test_disabling_one_of_two_admins() {
        let pool = test_support::pool().await;
        let first = ensure_admin(&pool, "admin", "admin-pass")
            .await
            .unwrap()
            .unwrap();
        let second = create(
            &pool,
            UserCreate {
                role: Role::Admin,
                ..cashier("ada")
            },
        )
        .await
        .unwrap();

        let disabled = update(
            &pool,
            second.id,
            UserUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(!disabled.is_active);

        // the disabled admin no longer counts
        let err = delete(&pool, first.id, second.id).await.unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::LastAdmin, _)));
        assert!(delete(&pool, second.id, first.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_partial_update() {
        let pool = test_support::pool().await;
        let user = create(&pool, cashier("cam")).await.unwrap();
        let updated = update(
            &pool,
            user.id,
            UserUpdate {
                phone: Some("555-0100".into()),
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.phone.as_deref(), Some("555-0100"));
        assert_eq!(updated.email.as_deref(), Some("cam@example.com"));
        assert!(!updated.is_active);
    }
}
