//! Course-string resolution collaborator interface.

use async_trait::async_trait;

use coursehub_core::result::AppResult;
use coursehub_entity::group::Group;

/// The (student group, optional faculty group) pair a course string
/// resolves to.
#[derive(Debug, Clone)]
pub struct ResolvedGroups {
    /// The primary group the batch targets.
    pub group: Group,
    /// The faculty group, when the course has one.
    pub faculty_group: Option<Group>,
}

/// Maps an opaque course identifier string to its group pair.
///
/// Implemented outside this core (registrar integrations and the like).
/// Resolution failures surface as validation errors to the caller; they
/// are never swallowed.
#[async_trait]
pub trait CourseStringResolver: Send + Sync {
    /// Resolve a course string to its groups.
    async fn resolve(&self, course_string: &str) -> AppResult<ResolvedGroups>;
}
