//! Materialized course membership.

use std::collections::HashSet;

use uuid::Uuid;

use crate::user::User;

/// A snapshot of one course's membership, with set indexes for O(1)
/// role predicates.
///
/// Members are kept sorted by (first name, last name, username); repeated
/// listing calls are stable absent mutation because the snapshot itself
/// never changes.
#[derive(Debug, Clone)]
pub struct CourseRoster {
    /// The course this roster was materialized for.
    course_id: Uuid,
    /// All primary-group members, sorted.
    members: Vec<User>,
    /// Faculty-group members, sorted. Empty when the course has no
    /// faculty group.
    faculty: Vec<User>,
    /// Identity index over `members`.
    member_ids: HashSet<Uuid>,
    /// Identity index over `faculty`.
    faculty_ids: HashSet<Uuid>,
}

impl CourseRoster {
    /// Build a roster from the raw member and faculty listings.
    ///
    /// Both listings are sorted here so the ordering contract holds no
    /// matter where the rows came from.
    pub fn new(course_id: Uuid, mut members: Vec<User>, mut faculty: Vec<User>) -> Self {
        members.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        faculty.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        let member_ids = members.iter().map(|u| u.id).collect();
        let faculty_ids = faculty.iter().map(|u| u.id).collect();

        Self {
            course_id,
            members,
            faculty,
            member_ids,
            faculty_ids,
        }
    }

    /// The course this roster belongs to.
    pub fn course_id(&self) -> Uuid {
        self.course_id
    }

    /// All members of the primary group, sorted by
    /// (first name, last name, username).
    pub fn members(&self) -> &[User] {
        &self.members
    }

    /// Members minus faculty. When the course has no faculty group this is
    /// every member.
    pub fn students(&self) -> Vec<&User> {
        self.members
            .iter()
            .filter(|u| !self.faculty_ids.contains(&u.id))
            .collect()
    }

    /// Faculty-group members, or empty if no faculty group.
    pub fn faculty(&self) -> &[User] {
        &self.faculty
    }

    /// Whether the user holds the instructor role for this course.
    ///
    /// Staff accounts are faculty everywhere.
    pub fn is_faculty(&self, user: &User) -> bool {
        user.is_staff || self.faculty_ids.contains(&user.id)
    }

    /// Whether the user is a member of this course.
    ///
    /// Staff accounts are members everywhere.
    pub fn is_member(&self, user: &User) -> bool {
        user.is_staff || self.member_ids.contains(&user.id)
    }
}
