//! Local cache configuration.

use serde::{Deserialize, Serialize};

/// Where locally cached state is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// JSON file holding the folder listing from the last successful sync.
    #[serde(default = "default_folder_cache")]
    pub folder_cache_path: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            folder_cache_path: default_folder_cache(),
        }
    }
}

fn default_folder_cache() -> String {
    "data/folder-cache.json".to_string()
}
