//! Policy engine configuration.

use serde::{Deserialize, Serialize};

/// Settings consumed by the policy registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Variant applied to collaboration objects that name no policy.
    #[serde(default = "default_variant")]
    pub default_variant: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            default_variant: default_variant(),
        }
    }
}

fn default_variant() -> String {
    "CourseProtected".to_string()
}
