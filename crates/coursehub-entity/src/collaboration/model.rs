//! Collaboration object model.
//!
//! Collaboration objects are owned by an external system; this core only
//! reads them to evaluate access policies. Nothing here mutates them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shared collaboration object belonging to a collaboration context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collaboration {
    /// Unique object identifier.
    pub id: Uuid,
    /// The collaboration context the object belongs to. Access requires
    /// this to equal the caller's active context (except for public reads).
    pub context_id: Uuid,
    /// The owning user.
    pub owner_id: Uuid,
    /// Associated group, if any.
    pub group_id: Option<Uuid>,
    /// Name of the policy variant governing the object. `None` falls back
    /// to the registry's configured default variant.
    pub policy: Option<String>,
}

impl Collaboration {
    /// Whether the given user owns this object.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }
}
