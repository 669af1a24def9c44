//! Cloud-drive folder configuration.

use serde::{Deserialize, Serialize};

/// Settings for the drive-backed folder hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveConfig {
    /// Root folder of the document hierarchy. When unset, the backend is
    /// asked for it (`GET /folders/gdrive-base-id`).
    #[serde(default)]
    pub base_folder_id: Option<String>,
    /// Whether a folder sync also asks the backend to refresh its own
    /// drive cache.
    #[serde(default = "default_true")]
    pub refresh_backend_cache: bool,
    /// Whether a successful sync is announced on the realtime channel.
    #[serde(default = "default_true")]
    pub announce_sync: bool,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            base_folder_id: None,
            refresh_backend_cache: true,
            announce_sync: true,
        }
    }
}

fn default_true() -> bool {
    true
}
