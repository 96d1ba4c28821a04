//! Membership resolution over course groups.

use std::sync::Arc;

use uuid::Uuid;

use coursehub_core::result::AppResult;
use coursehub_database::repositories::{CourseRepository, GroupRepository};
use coursehub_entity::course::{Course, CourseListing};
use coursehub_entity::membership::{CourseRoster, GroupIndex};
use coursehub_entity::user::User;

/// Materializes course membership into set-indexed snapshots and serves
/// the membership query surface.
///
/// Reads only; membership edits go through the provisioning pipeline or
/// [`crate::course::CourseService`].
#[derive(Debug, Clone)]
pub struct MembershipService {
    /// Course repository.
    course_repo: Arc<CourseRepository>,
    /// Group repository.
    group_repo: Arc<GroupRepository>,
}

impl MembershipService {
    /// Create a new membership service.
    pub fn new(course_repo: Arc<CourseRepository>, group_repo: Arc<GroupRepository>) -> Self {
        Self {
            course_repo,
            group_repo,
        }
    }

    /// Materialize the course's membership snapshot.
    ///
    /// One query per group; every predicate on the returned roster is a
    /// set lookup afterwards.
    pub async fn roster(&self, course: &Course) -> AppResult<CourseRoster> {
        let members = self.group_repo.members(course.group_id).await?;
        let faculty = match course.faculty_group_id {
            Some(faculty_group_id) => self.group_repo.members(faculty_group_id).await?,
            None => Vec::new(),
        };
        Ok(CourseRoster::new(course.id, members, faculty))
    }

    /// Preload member sets for the groups referenced by collaboration
    /// objects under evaluation.
    pub async fn group_index(&self, group_ids: &[Uuid]) -> AppResult<GroupIndex> {
        let mut index = GroupIndex::new();
        for &group_id in group_ids {
            index.insert(group_id, self.group_repo.member_ids(group_id).await?);
        }
        Ok(index)
    }

    /// Whether the user is a member of the course.
    pub async fn is_member(&self, course: &Course, user: &User) -> AppResult<bool> {
        if user.is_staff {
            return Ok(true);
        }
        self.group_repo.is_member(course.group_id, user.id).await
    }

    /// Whether the user holds the instructor role for the course.
    pub async fn is_faculty(&self, course: &Course, user: &User) -> AppResult<bool> {
        if user.is_staff {
            return Ok(true);
        }
        match course.faculty_group_id {
            Some(faculty_group_id) => self.group_repo.is_member(faculty_group_id, user.id).await,
            None => Ok(false),
        }
    }

    /// The membership query surface: every course where the user is a
    /// member, keyed by group name, ordered most recent year/term first,
    /// then title. Staff see every course.
    pub async fn course_listing(&self, user: &User) -> AppResult<Vec<CourseListing>> {
        if user.is_staff {
            self.course_repo.listing_all().await
        } else {
            self.course_repo.listing_for_user(user.id).await
        }
    }
}
