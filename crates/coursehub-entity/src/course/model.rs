//! Course entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A course binding a primary group and an optional faculty group.
///
/// A primary group maps to at most one course; the `group_id` column
/// carries a UNIQUE constraint so the invariant holds under concurrent
/// writes as well.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    /// Unique course identifier.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Primary group (all participants). Mandatory, 1:1.
    pub group_id: Uuid,
    /// Faculty group (instructor subset). Optional, 0:1.
    pub faculty_group_id: Option<Uuid>,
    /// Academic year, used for listing order.
    pub year: Option<i32>,
    /// Term within the year, used for listing order.
    pub term: Option<i32>,
    /// When the course was created.
    pub created_at: DateTime<Utc>,
    /// When the course was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Whether the course has a faculty group attached.
    pub fn has_faculty_group(&self) -> bool {
        self.faculty_group_id.is_some()
    }
}

/// One row of the membership query surface: a course a user belongs to,
/// keyed by its primary group's name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CourseListing {
    /// The primary group's name.
    pub group_name: String,
    /// The course title.
    pub title: String,
    /// Academic year.
    pub year: Option<i32>,
    /// Term within the year.
    pub term: Option<i32>,
}

/// Data required to create a new course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCourse {
    /// Display title.
    pub title: String,
    /// Primary group.
    pub group_id: Uuid,
    /// Faculty group (optional).
    pub faculty_group_id: Option<Uuid>,
    /// Academic year (optional).
    pub year: Option<i32>,
    /// Term within the year (optional).
    pub term: Option<i32>,
}
