//! Group membership index for policy evaluation.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

/// Membership sets for the groups referenced by the collaboration objects
/// under evaluation.
///
/// Preloaded once per request so policy rules can answer "is this user in
/// the object's group" without touching storage.
#[derive(Debug, Clone, Default)]
pub struct GroupIndex {
    groups: HashMap<Uuid, HashSet<Uuid>>,
}

impl GroupIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the member set of one group.
    pub fn insert(&mut self, group_id: Uuid, member_ids: HashSet<Uuid>) {
        self.groups.insert(group_id, member_ids);
    }

    /// Whether the user belongs to the group. Unknown groups answer `false`.
    pub fn contains(&self, group_id: Uuid, user_id: Uuid) -> bool {
        self.groups
            .get(&group_id)
            .map(|members| members.contains(&user_id))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let group = Uuid::new_v4();
        let user = Uuid::new_v4();

        let mut index = GroupIndex::new();
        index.insert(group, HashSet::from([user]));

        assert!(index.contains(group, user));
        assert!(!index.contains(group, Uuid::new_v4()));
        assert!(!index.contains(Uuid::new_v4(), user));
    }
}
