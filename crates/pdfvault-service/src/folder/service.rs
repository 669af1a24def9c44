//! Folder screen operations backed by the REST API.

use serde_json::Value;
use tracing::info;
use validator::Validate;

use pdfvault_client::api::FolderApi;
use pdfvault_core::{AppError, AppResult};
use pdfvault_entity::folder::Folder;
use pdfvault_entity::folder::model::UpdateFolder;

/// A folder rename/description edit, validated before sending.
#[derive(Debug, Clone, Default, Validate)]
pub struct FolderEdit {
    /// New name.
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// New description.
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// Lists and edits backend folders.
#[derive(Debug, Clone)]
pub struct FolderService {
    api: FolderApi,
}

impl FolderService {
    /// Create the service.
    pub fn new(api: FolderApi) -> Self {
        Self { api }
    }

    /// Folders stored by the backend.
    pub async fn list(&self) -> AppResult<Vec<Folder>> {
        self.api.list().await
    }

    /// Files in a drive folder.
    pub async fn pdfs_in(&self, folder_id: &str) -> AppResult<Vec<Value>> {
        if folder_id.trim().is_empty() {
            return Err(AppError::validation("Folder id is required"));
        }
        self.api.list_pdfs(folder_id).await
    }

    /// Rename a folder or change its description.
    pub async fn update(&self, folder_id: &str, edit: FolderEdit) -> AppResult<Folder> {
        edit.validate()?;
        let update = UpdateFolder {
            name: edit.name.map(|n| n.trim().to_string()),
            description: edit.description,
        };
        if update.name.is_none() && update.description.is_none() {
            return Err(AppError::validation("Nothing to update"));
        }
        let folder = self.api.update(folder_id, &update).await?;
        info!(folder_id = %folder.id, name = %folder.name, "Folder updated");
        Ok(folder)
    }
}
