//! Materials tree configuration.

use serde::{Deserialize, Serialize};

/// Settings for the per-course folder hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialsConfig {
    /// Name given to a lazily created course root.
    #[serde(default = "default_root_name")]
    pub root_folder_name: String,
    /// Upper bound on parent-pointer hops before a walk is declared corrupt.
    #[serde(default = "default_max_depth")]
    pub max_tree_depth: usize,
}

impl Default for MaterialsConfig {
    fn default() -> Self {
        Self {
            root_folder_name: default_root_name(),
            max_tree_depth: default_max_depth(),
        }
    }
}

fn default_root_name() -> String {
    "Root".to_string()
}

fn default_max_depth() -> usize {
    64
}
