//! Evaluation context passed into every policy rule.

use uuid::Uuid;

use coursehub_entity::collaboration::Collaboration;
use coursehub_entity::membership::{CourseRoster, GroupIndex};
use coursehub_entity::user::User;

/// The acting user, the course in scope, and the caller's active
/// collaboration context.
///
/// Built once per request from materialized membership snapshots, so every
/// predicate here is a set lookup.
#[derive(Debug, Clone)]
pub struct EvalContext<'a> {
    /// The acting user.
    pub user: &'a User,
    /// Membership snapshot for the course in scope.
    pub roster: &'a CourseRoster,
    /// Member sets for the groups referenced by objects under evaluation.
    pub groups: &'a GroupIndex,
    /// The collaboration context active for the caller's session.
    pub active_context: Uuid,
}

impl<'a> EvalContext<'a> {
    /// Create a new evaluation context.
    pub fn new(
        user: &'a User,
        roster: &'a CourseRoster,
        groups: &'a GroupIndex,
        active_context: Uuid,
    ) -> Self {
        Self {
            user,
            roster,
            groups,
            active_context,
        }
    }

    /// Whether the object's context equals the caller's active context.
    ///
    /// This is the hard precondition of every rule except the public read.
    pub fn context_matches(&self, obj: &Collaboration) -> bool {
        obj.context_id == self.active_context
    }

    /// Whether the acting user holds the instructor role for the course.
    pub fn is_faculty(&self) -> bool {
        self.roster.is_faculty(self.user)
    }

    /// Whether the acting user is a member of the course.
    pub fn is_member(&self) -> bool {
        self.roster.is_member(self.user)
    }

    /// Whether the acting user owns the object.
    pub fn is_owner(&self, obj: &Collaboration) -> bool {
        obj.is_owned_by(self.user.id)
    }

    /// Whether the acting user belongs to the object's associated group.
    ///
    /// Objects without a group answer `false`.
    pub fn in_object_group(&self, obj: &Collaboration) -> bool {
        obj.group_id
            .map(|group_id| self.groups.contains(group_id, self.user.id))
            .unwrap_or(false)
    }
}
