//! Folder entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical representation of a cloud-drive folder.
///
/// `id` is assigned by the drive provider and never changes. `parent_id`
/// is `None` for folders that sit directly below the hierarchy root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderRecord {
    /// Provider-assigned folder identifier.
    pub id: String,
    /// Folder name.
    pub name: String,
    /// Parent folder identifier (`None` for top-level folders).
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl FolderRecord {
    /// Create a folder record.
    pub fn new(id: impl Into<String>, name: impl Into<String>, parent_id: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: parent_id.map(str::to_string),
        }
    }

    /// Check if this is a top-level folder (no parent).
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A folder as stored by the backend's own database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Folder name.
    pub name: String,
    /// Parent folder; the backend may send an id or a populated object.
    #[serde(default)]
    pub parent: Option<serde_json::Value>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// When the folder was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for updating a folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFolder {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
