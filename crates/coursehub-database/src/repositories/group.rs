//! Group repository implementation.

use std::collections::HashSet;

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use coursehub_core::error::{AppError, ErrorKind};
use coursehub_core::result::AppResult;
use coursehub_entity::group::Group;
use coursehub_entity::user::User;

/// Repository for groups and group membership.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    /// Create a new group repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a group by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Group>> {
        sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find group by id", e)
            })
    }

    /// Find a group by its unique name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Group>> {
        sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find group by name", e)
            })
    }

    /// Create a new group.
    pub async fn create(&self, name: &str) -> AppResult<Group> {
        sqlx::query_as::<_, Group>("INSERT INTO groups (name) VALUES ($1) RETURNING *")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err)
                    if db_err.constraint() == Some("groups_name_key") =>
                {
                    AppError::conflict(format!("Group '{name}' already exists"))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to create group", e),
            })
    }

    /// All members of a group, ordered by (first name, last name, username).
    pub async fn members(&self, group_id: Uuid) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT u.* FROM users u \
             JOIN group_memberships gm ON gm.user_id = u.id \
             WHERE gm.group_id = $1 \
             ORDER BY u.first_name, u.last_name, u.username",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list group members", e))
    }

    /// The identity set of a group's members.
    pub async fn member_ids(&self, group_id: Uuid) -> AppResult<HashSet<Uuid>> {
        let ids: Vec<Uuid> =
            sqlx::query_scalar("SELECT user_id FROM group_memberships WHERE group_id = $1")
                .bind(group_id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to list member ids", e)
                })?;

        Ok(ids.into_iter().collect())
    }

    /// Whether a user belongs to a group.
    pub async fn is_member(&self, group_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM group_memberships WHERE group_id = $1 AND user_id = $2)",
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check membership", e))?;

        Ok(exists)
    }

    /// Add a user to a group inside a caller-managed transaction.
    ///
    /// Re-adding an existing member is a no-op; returns whether a new
    /// membership row was written.
    pub async fn add_member(
        &self,
        conn: &mut PgConnection,
        group_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO group_memberships (group_id, user_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(group_id)
        .bind(user_id)
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add group member", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a user from a group.
    ///
    /// Removing a membership that does not exist is a not-found error.
    pub async fn remove_member(&self, group_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let result =
            sqlx::query("DELETE FROM group_memberships WHERE group_id = $1 AND user_id = $2")
                .bind(group_id)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to remove group member", e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "User {user_id} is not a member of group {group_id}"
            )));
        }
        Ok(())
    }
}
