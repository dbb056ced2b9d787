//! User repository implementation.

use sqlx::MySqlPool;

use librauth_core::error::{AppError, ErrorKind};
use librauth_core::result::AppResult;
use librauth_entity::User;

/// Repository for user lookup and creation.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: MySqlPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, username, password_hash, created_at, updated_at \
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::CredentialStoreUnavailable,
                "Failed to find user by id",
                e,
            )
        })
    }

    /// Find a user by email or username (case-insensitive).
    pub async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, username, password_hash, created_at, updated_at \
             FROM users WHERE LOWER(email) = LOWER(?) OR LOWER(username) = LOWER(?)",
        )
        .bind(identifier)
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::CredentialStoreUnavailable,
                "Failed to find user by identifier",
                e,
            )
        })
    }

    /// Insert a new user and return the stored row.
    ///
    /// A duplicate email or username surfaces as a `Conflict`.
    pub async fn create(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> AppResult<User> {
        let result = sqlx::query(
            "INSERT INTO users (email, username, password_hash) VALUES (?, ?, ?)",
        )
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::conflict("Email or username already exists")
            }
            _ => AppError::with_source(
                ErrorKind::CredentialStoreUnavailable,
                "Failed to create user",
                e,
            ),
        })?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::internal("Created user row not found after insert")
        })
    }
}
