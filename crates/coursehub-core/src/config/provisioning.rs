//! Bulk provisioning configuration.

use serde::{Deserialize, Serialize};

/// Settings consumed by the provisioning pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisioningConfig {
    /// Maximum number of lines accepted in one submitted batch.
    ///
    /// Batches above this size are rejected before any mutation.
    #[serde(default = "default_max_batch_lines")]
    pub max_batch_lines: usize,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            max_batch_lines: default_max_batch_lines(),
        }
    }
}

fn default_max_batch_lines() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_batch_limit() {
        assert_eq!(ProvisioningConfig::default().max_batch_lines, 1000);
    }
}
