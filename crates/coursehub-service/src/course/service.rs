//! Course lifecycle operations.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use coursehub_core::error::{AppError, ErrorKind};
use coursehub_core::result::AppResult;
use coursehub_database::repositories::{CourseRepository, GroupRepository, UserRepository};
use coursehub_entity::course::{Course, CreateCourse, derive_slug};
use coursehub_entity::user::User;

/// Creates courses and edits their rosters.
///
/// Faculty writes keep the faculty group a subset of the primary group:
/// adding an instructor adds the primary membership too, and removing a
/// member removes any instructor role with it.
#[derive(Debug, Clone)]
pub struct CourseService {
    /// Pool for multi-statement roster edits.
    pool: PgPool,
    /// Course repository.
    course_repo: Arc<CourseRepository>,
    /// Group repository.
    group_repo: Arc<GroupRepository>,
    /// User repository.
    user_repo: Arc<UserRepository>,
}

impl CourseService {
    /// Create a new course service.
    pub fn new(
        pool: PgPool,
        course_repo: Arc<CourseRepository>,
        group_repo: Arc<GroupRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            pool,
            course_repo,
            group_repo,
            user_repo,
        }
    }

    /// Create a course over an existing group pair.
    ///
    /// Both groups must exist, and the primary group must not already be
    /// bound to another course.
    pub async fn create(&self, data: CreateCourse) -> AppResult<Course> {
        self.require_group(data.group_id).await?;
        if let Some(faculty_group_id) = data.faculty_group_id {
            self.require_group(faculty_group_id).await?;
        }

        let course = self.course_repo.create(&data).await?;
        info!(course_id = %course.id, title = %course.title, "Course created");
        Ok(course)
    }

    /// Update a course's title, groups, and term information.
    ///
    /// Rebinding the course to a group already bound elsewhere is rejected
    /// the same way creation is.
    pub async fn update(&self, course: &Course) -> AppResult<Course> {
        self.require_group(course.group_id).await?;
        if let Some(faculty_group_id) = course.faculty_group_id {
            self.require_group(faculty_group_id).await?;
        }

        let updated = self.course_repo.update(course).await?;
        info!(course_id = %updated.id, "Course updated");
        Ok(updated)
    }

    /// Fetch a course that must exist.
    pub async fn get(&self, course_id: Uuid) -> AppResult<Course> {
        self.course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Course {course_id} not found")))
    }

    /// Resolve or create a user by username and add them to the course's
    /// primary group.
    pub async fn add_member(&self, course: &Course, username: &str) -> AppResult<User> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let (user, created) = self.user_repo.get_or_create(&mut tx, username).await?;
        self.group_repo
            .add_member(&mut tx, course.group_id, user.id)
            .await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit membership", e)
        })?;

        info!(course_id = %course.id, username = %user.username, created, "Member added");
        Ok(user)
    }

    /// Grant the instructor role for a course.
    ///
    /// Adds the user to the faculty group and to the primary group, so
    /// faculty are always members as well. Courses without a faculty
    /// group cannot take instructors.
    pub async fn add_faculty(&self, course: &Course, user_id: Uuid) -> AppResult<()> {
        let faculty_group_id = course.faculty_group_id.ok_or_else(|| {
            AppError::not_found(format!("Course {} has no faculty group", course.id))
        })?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        self.group_repo
            .add_member(&mut tx, faculty_group_id, user_id)
            .await?;
        self.group_repo
            .add_member(&mut tx, course.group_id, user_id)
            .await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit faculty role", e)
        })?;

        info!(course_id = %course.id, %user_id, "Faculty role granted");
        Ok(())
    }

    /// Remove a user from the course.
    ///
    /// The instructor role, when held, goes with the primary membership.
    /// Removing a user who is not a member is a not-found error.
    pub async fn remove_member(&self, course: &Course, user_id: Uuid) -> AppResult<()> {
        if let Some(faculty_group_id) = course.faculty_group_id {
            if self.group_repo.is_member(faculty_group_id, user_id).await? {
                self.group_repo.remove_member(faculty_group_id, user_id).await?;
            }
        }

        self.group_repo.remove_member(course.group_id, user_id).await?;

        info!(course_id = %course.id, %user_id, "Member removed");
        Ok(())
    }

    /// Derive the course's short stable identifier from its primary
    /// group's structured name, falling back to the sanitized title.
    pub async fn slug(&self, course: &Course) -> AppResult<String> {
        let group = self.require_group(course.group_id).await?;
        Ok(derive_slug(&group.name, &course.title))
    }

    async fn require_group(&self, group_id: Uuid) -> AppResult<coursehub_entity::group::Group> {
        self.group_repo
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| AppError::validation(format!("Group {group_id} does not exist")))
    }
}
