//! User repository implementation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use coursehub_core::error::{AppError, ErrorKind};
use coursehub_core::result::AppResult;
use coursehub_entity::user::{CreateUser, User};

/// Repository for user CRUD and query operations.
///
/// Methods taking a [`PgConnection`] participate in a caller-managed
/// transaction; the provisioning pipeline uses them so one submitted batch
/// commits or rolls back as a unit.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by username. Usernames match case-sensitively.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    /// Create a new user.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, first_name, last_name, password_hash, is_staff) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(&data.username)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.password_hash)
        .bind(data.is_staff)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_username_key") =>
            {
                AppError::conflict(format!("Username '{}' already exists", data.username))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Find the user with this username, creating a bare account if none
    /// exists. Returns the user and whether a new record was written.
    ///
    /// Creation races through the username unique constraint: a concurrent
    /// insert makes the `ON CONFLICT DO NOTHING` return no row, and the
    /// follow-up select picks up the winner's record.
    pub async fn get_or_create(
        &self,
        conn: &mut PgConnection,
        username: &str,
    ) -> AppResult<(User, bool)> {
        let inserted = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, first_name, last_name) VALUES ($1, '', '') \
             ON CONFLICT (username) DO NOTHING \
             RETURNING *",
        )
        .bind(username)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create user", e))?;

        if let Some(user) = inserted {
            return Ok((user, true));
        }

        let existing = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })?
            .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))?;

        Ok((existing, false))
    }

    /// Overwrite a user's stored password hash.
    pub async fn set_password(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        password_hash: &str,
    ) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(user_id)
                .bind(password_hash)
                .execute(conn)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update password", e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        Ok(())
    }
}
