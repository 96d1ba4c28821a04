//! Policy variants as records of shared rule values.

use std::fmt;
use std::sync::Arc;

use coursehub_entity::collaboration::Collaboration;

use super::action::PolicyAction;
use super::context::EvalContext;

/// A single allow/deny rule.
///
/// Rules are shared between actions and between variants by cloning the
/// `Arc`, never by duplicating the body: an aliased action (edit := read)
/// holds the very same rule value as its source.
pub type Rule = Arc<dyn Fn(&Collaboration, &EvalContext<'_>) -> bool + Send + Sync>;

/// A bundle of five rules, one per [`PolicyAction`].
///
/// Derived variants start from a base variant's rule set and override
/// entries with the `with_*` builders. Overrides replace the slot they name
/// and nothing else: an alias taken from a rule *before* it was overridden
/// keeps pointing at the rule value it was aliased from.
#[derive(Clone)]
pub struct PolicyVariant {
    manage: Rule,
    edit: Rule,
    delete: Rule,
    read: Rule,
    add_child: Rule,
}

impl PolicyVariant {
    /// Create a variant from its five rules.
    pub fn new(manage: Rule, edit: Rule, delete: Rule, read: Rule, add_child: Rule) -> Self {
        Self {
            manage,
            edit,
            delete,
            read,
            add_child,
        }
    }

    /// The rule deciding the given action.
    pub fn rule(&self, action: PolicyAction) -> &Rule {
        match action {
            PolicyAction::Manage => &self.manage,
            PolicyAction::Edit => &self.edit,
            PolicyAction::Delete => &self.delete,
            PolicyAction::Read => &self.read,
            PolicyAction::AddChild => &self.add_child,
        }
    }

    /// A shareable handle to the read rule, for aliasing in derived
    /// variants.
    pub fn read_rule(&self) -> Rule {
        Arc::clone(&self.read)
    }

    /// A shareable handle to the manage rule.
    pub fn manage_rule(&self) -> Rule {
        Arc::clone(&self.manage)
    }

    /// Replace the manage rule.
    pub fn with_manage(mut self, rule: Rule) -> Self {
        self.manage = rule;
        self
    }

    /// Replace the edit rule.
    pub fn with_edit(mut self, rule: Rule) -> Self {
        self.edit = rule;
        self
    }

    /// Replace the delete rule.
    pub fn with_delete(mut self, rule: Rule) -> Self {
        self.delete = rule;
        self
    }

    /// Replace the read rule.
    pub fn with_read(mut self, rule: Rule) -> Self {
        self.read = rule;
        self
    }

    /// Replace the add_child rule.
    pub fn with_add_child(mut self, rule: Rule) -> Self {
        self.add_child = rule;
        self
    }

    /// Evaluate one action against an object and context.
    pub fn evaluate(&self, action: PolicyAction, obj: &Collaboration, ctx: &EvalContext<'_>) -> bool {
        (self.rule(action).as_ref())(obj, ctx)
    }
}

impl fmt::Debug for PolicyVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyVariant").finish_non_exhaustive()
    }
}
