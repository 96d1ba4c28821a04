//! Policy action definitions.

use std::fmt;
use std::str::FromStr;

use coursehub_core::error::AppError;

/// Actions a policy variant can decide on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyAction {
    /// Administer the object.
    Manage,
    /// Modify the object.
    Edit,
    /// Remove the object.
    Delete,
    /// View the object.
    Read,
    /// Attach a child object.
    AddChild,
}

impl PolicyAction {
    /// Every action, in rule-table order.
    pub const ALL: [PolicyAction; 5] = [
        Self::Manage,
        Self::Edit,
        Self::Delete,
        Self::Read,
        Self::AddChild,
    ];

    /// Return the action as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manage => "manage",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Read => "read",
            Self::AddChild => "add_child",
        }
    }
}

impl fmt::Display for PolicyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PolicyAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manage" => Ok(Self::Manage),
            "edit" => Ok(Self::Edit),
            "delete" => Ok(Self::Delete),
            "read" => Ok(Self::Read),
            "add_child" => Ok(Self::AddChild),
            _ => Err(AppError::lookup(format!(
                "Unknown policy action: '{s}'. Expected one of: manage, edit, delete, read, add_child"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursehub_core::error::ErrorKind;

    #[test]
    fn test_from_str_round_trips() {
        for action in PolicyAction::ALL {
            assert_eq!(action.as_str().parse::<PolicyAction>().unwrap(), action);
        }
    }

    #[test]
    fn test_unknown_action_is_a_lookup_error() {
        let err = "destroy".parse::<PolicyAction>().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lookup);
    }
}
