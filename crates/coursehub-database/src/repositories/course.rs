//! Course repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use coursehub_core::error::{AppError, ErrorKind};
use coursehub_core::result::AppResult;
use coursehub_entity::course::{Course, CourseListing, CreateCourse};

/// Ordering shared by every course listing: most recent year first, then
/// term, then title.
const LISTING_ORDER: &str = "ORDER BY c.year DESC NULLS LAST, c.term DESC NULLS LAST, c.title ASC";

/// Repository for course CRUD and listing queries.
#[derive(Debug, Clone)]
pub struct CourseRepository {
    pool: PgPool,
}

impl CourseRepository {
    /// Create a new course repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a course by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Course>> {
        sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find course by id", e)
            })
    }

    /// Find the course bound to a primary group, if any.
    pub async fn find_by_group(&self, group_id: Uuid) -> AppResult<Option<Course>> {
        sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE group_id = $1")
            .bind(group_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find course by group", e)
            })
    }

    /// Create a new course.
    ///
    /// A primary group bound to another course violates the `group_id`
    /// unique constraint and is rejected as a validation failure.
    pub async fn create(&self, data: &CreateCourse) -> AppResult<Course> {
        sqlx::query_as::<_, Course>(
            "INSERT INTO courses (title, group_id, faculty_group_id, year, term) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(&data.title)
        .bind(data.group_id)
        .bind(data.faculty_group_id)
        .bind(data.year)
        .bind(data.term)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_group_binding_error(e, data.group_id, "create"))
    }

    /// Update a course's title, groups, and term information.
    pub async fn update(&self, course: &Course) -> AppResult<Course> {
        sqlx::query_as::<_, Course>(
            "UPDATE courses SET title = $2, group_id = $3, faculty_group_id = $4, \
                                year = $5, term = $6, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(course.id)
        .bind(&course.title)
        .bind(course.group_id)
        .bind(course.faculty_group_id)
        .bind(course.year)
        .bind(course.term)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_group_binding_error(e, course.group_id, "update"))?
        .ok_or_else(|| AppError::not_found(format!("Course {} not found", course.id)))
    }

    /// All courses, in listing order.
    pub async fn all(&self) -> AppResult<Vec<Course>> {
        sqlx::query_as::<_, Course>(&format!("SELECT c.* FROM courses c {LISTING_ORDER}"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list courses", e))
    }

    /// Courses whose primary group contains the user, in listing order.
    pub async fn for_user(&self, user_id: Uuid) -> AppResult<Vec<Course>> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT c.* FROM courses c \
             JOIN group_memberships gm ON gm.group_id = c.group_id \
             WHERE gm.user_id = $1 {LISTING_ORDER}"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list courses for user", e)
        })
    }

    /// Listing rows (group name + title) for the user's courses.
    pub async fn listing_for_user(&self, user_id: Uuid) -> AppResult<Vec<CourseListing>> {
        sqlx::query_as::<_, CourseListing>(&format!(
            "SELECT g.name AS group_name, c.title, c.year, c.term FROM courses c \
             JOIN groups g ON g.id = c.group_id \
             JOIN group_memberships gm ON gm.group_id = c.group_id \
             WHERE gm.user_id = $1 {LISTING_ORDER}"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to build course listing", e)
        })
    }

    /// Listing rows for every course (staff view).
    pub async fn listing_all(&self) -> AppResult<Vec<CourseListing>> {
        sqlx::query_as::<_, CourseListing>(&format!(
            "SELECT g.name AS group_name, c.title, c.year, c.term FROM courses c \
             JOIN groups g ON g.id = c.group_id {LISTING_ORDER}"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to build course listing", e)
        })
    }

    fn map_group_binding_error(e: sqlx::Error, group_id: Uuid, op: &str) -> AppError {
        match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("courses_group_id_key") =>
            {
                AppError::validation(format!(
                    "Group {group_id} is already bound to another course"
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, format!("Failed to {op} course"), e),
        }
    }
}
