//! Named policy variant registry and evaluation entry points.

use std::collections::HashMap;

use coursehub_core::config::policy::PolicyConfig;
use coursehub_core::error::AppError;
use coursehub_core::result::AppResult;
use coursehub_entity::collaboration::Collaboration;

use super::action::PolicyAction;
use super::context::EvalContext;
use super::variant::PolicyVariant;
use super::variants;

/// A registered variant with its human-readable description.
#[derive(Debug, Clone)]
pub struct RegisteredPolicy {
    /// Description shown in administrative listings.
    pub description: String,
    /// The variant's rule set.
    pub variant: PolicyVariant,
}

/// Resolves variant names to rule sets and evaluates requested actions.
///
/// Lookup failures are errors, not denials, so callers can always tell
/// misconfiguration apart from an authorization decision.
#[derive(Debug, Clone)]
pub struct PolicyRegistry {
    policies: HashMap<String, RegisteredPolicy>,
    default_variant: String,
}

impl PolicyRegistry {
    /// Create an empty registry.
    pub fn new(config: &PolicyConfig) -> Self {
        Self {
            policies: HashMap::new(),
            default_variant: config.default_variant.clone(),
        }
    }

    /// Create a registry pre-loaded with the built-in course variants.
    pub fn with_defaults(config: &PolicyConfig) -> AppResult<Self> {
        let mut registry = Self::new(config);
        registry.register(
            "PrivateStudentAndFaculty",
            "Private between faculty and student",
            variants::private_student_and_faculty(),
        )?;
        registry.register(
            "CourseProtected",
            "Protected to Course Members",
            variants::course_protected(),
        )?;
        registry.register(
            "CourseCollaboration",
            "Course Collaboration",
            variants::course_collaboration(),
        )?;
        registry.register(
            "CoursePublicCollaboration",
            "Public Course Collaboration",
            variants::course_public_collaboration(),
        )?;
        Ok(registry)
    }

    /// Register a variant under a name.
    ///
    /// Duplicate names are rejected and the existing registration is left
    /// intact.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        variant: PolicyVariant,
    ) -> AppResult<()> {
        let name = name.into();
        if self.policies.contains_key(&name) {
            return Err(AppError::conflict(format!(
                "Policy '{name}' is already registered"
            )));
        }
        self.policies.insert(
            name,
            RegisteredPolicy {
                description: description.into(),
                variant,
            },
        );
        Ok(())
    }

    /// Look up a registered variant by name.
    pub fn get(&self, name: &str) -> AppResult<&RegisteredPolicy> {
        self.policies
            .get(name)
            .ok_or_else(|| AppError::lookup(format!("Unknown policy variant: '{name}'")))
    }

    /// Registered variant names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.policies.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Evaluate a named variant's rule for one action.
    ///
    /// `Ok(false)` is a denial; `Err` means the variant name did not
    /// resolve.
    pub fn evaluate(
        &self,
        variant_name: &str,
        action: PolicyAction,
        obj: &Collaboration,
        ctx: &EvalContext<'_>,
    ) -> AppResult<bool> {
        let registered = self.get(variant_name)?;
        Ok(registered.variant.evaluate(action, obj, ctx))
    }

    /// Evaluate the variant governing the object itself, falling back to
    /// the configured default variant when the object names none.
    pub fn evaluate_for(
        &self,
        action: PolicyAction,
        obj: &Collaboration,
        ctx: &EvalContext<'_>,
    ) -> AppResult<bool> {
        let name = obj.policy.as_deref().unwrap_or(&self.default_variant);
        self.evaluate(name, action, obj, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursehub_core::error::ErrorKind;

    #[test]
    fn test_with_defaults_registers_the_four_variants() {
        let registry = PolicyRegistry::with_defaults(&PolicyConfig::default()).unwrap();
        assert_eq!(
            registry.names(),
            vec![
                "CourseCollaboration",
                "CoursePublicCollaboration",
                "CourseProtected",
                "PrivateStudentAndFaculty",
            ]
        );
    }

    #[test]
    fn test_duplicate_registration_is_rejected_and_existing_kept() {
        let mut registry = PolicyRegistry::with_defaults(&PolicyConfig::default()).unwrap();
        let err = registry
            .register(
                "CourseProtected",
                "replacement",
                variants::private_student_and_faculty(),
            )
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(
            registry.get("CourseProtected").unwrap().description,
            "Protected to Course Members"
        );
    }

    #[test]
    fn test_unknown_variant_is_a_lookup_error() {
        let registry = PolicyRegistry::with_defaults(&PolicyConfig::default()).unwrap();
        let err = registry.get("NoSuchPolicy").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lookup);
    }
}
