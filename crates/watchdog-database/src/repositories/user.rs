//! User repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;

use watchdog_core::error::{AppError, ErrorKind};
use watchdog_core::result::AppResult;
use watchdog_core::types::id::UserId;
use watchdog_entity::user::{CreateUser, User};

/// Repository for user lookup and registration.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a user by access key.
    pub async fn find_by_access_key(&self, access_key: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE access_key = ?")
            .bind(access_key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by access key", e)
            })
    }

    /// Find a user by messaging platform address.
    pub async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE external_id = ?")
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by external id", e)
            })
    }

    /// Return the delivery address of a user, if the user exists and has one.
    pub async fn find_external_id(&self, id: UserId) -> AppResult<Option<String>> {
        sqlx::query_scalar::<_, Option<String>>("SELECT external_id FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map(Option::flatten)
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to resolve delivery address", e)
            })
    }

    /// Create a new user.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (display_name, external_id, access_key, created_at) \
             VALUES (?, ?, ?, ?) \
             RETURNING *",
        )
        .bind(&data.display_name)
        .bind(&data.external_id)
        .bind(&data.access_key)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict("A user with this external id or access key already exists")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Insert a user unless one with the same `external_id` already exists.
    ///
    /// Returns `None` when the row already existed; the existing access key
    /// is left untouched.
    pub async fn insert_if_absent(&self, data: &CreateUser) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (display_name, external_id, access_key, created_at) \
             VALUES (?, ?, ?, ?) \
             ON CONFLICT (external_id) DO NOTHING \
             RETURNING *",
        )
        .bind(&data.display_name)
        .bind(&data.external_id)
        .bind(&data.access_key)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to register user", e))
    }
}
