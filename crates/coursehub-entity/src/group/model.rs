//! Group entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named set of users.
///
/// Two groups relate to a course: the primary group (all members) and an
/// optional faculty group (the instructor subset).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Group {
    /// Unique group identifier.
    pub id: Uuid,
    /// Unique group name. For course primary groups this is the structured
    /// name string the slug deriver parses.
    pub name: String,
    /// When the group was created.
    pub created_at: DateTime<Utc>,
}

/// A membership row linking a user to a group.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GroupMembership {
    /// The group.
    pub group_id: Uuid,
    /// The member.
    pub user_id: Uuid,
    /// When the membership was added.
    pub added_at: DateTime<Utc>,
}
