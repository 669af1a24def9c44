//! Folder endpoints, backend-side and drive-side.

use serde_json::{Value, json};

use pdfvault_core::AppResult;
use pdfvault_entity::folder::Folder;
use pdfvault_entity::folder::model::UpdateFolder;

use crate::dto::{BaseFolderResponse, MessageResponse};
use crate::http::ApiClient;

/// `/folders` endpoints.
#[derive(Debug, Clone)]
pub struct FolderApi {
    client: ApiClient,
}

impl FolderApi {
    /// Create the endpoint group.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Folders stored in the backend database.
    pub async fn list(&self) -> AppResult<Vec<Folder>> {
        self.client.get("/folders").await
    }

    /// Raw folder listing of the cloud drive.
    ///
    /// Records are returned untouched; the folder normalizer is the only
    /// place that interprets their shape.
    pub async fn list_drive_folders(&self) -> AppResult<Vec<Value>> {
        self.client.get("/folders/gdrive").await
    }

    /// The configured root of the drive hierarchy.
    pub async fn drive_base_id(&self) -> AppResult<Option<String>> {
        let response: BaseFolderResponse = self.client.get("/folders/gdrive-base-id").await?;
        Ok(response.base_folder_id.filter(|id| !id.is_empty()))
    }

    /// Files inside a folder, as listed by the drive (or the backend's
    /// fallback copy).
    pub async fn list_pdfs(&self, folder_id: &str) -> AppResult<Vec<Value>> {
        self.client
            .get(&format!("/folders/{folder_id}/pdfs"))
            .await
    }

    /// Update a folder's name or description.
    pub async fn update(&self, folder_id: &str, update: &UpdateFolder) -> AppResult<Folder> {
        self.client
            .put(&format!("/folders/{folder_id}"), update)
            .await
    }

    /// Ask the backend to refresh its cached copy of the drive folders.
    pub async fn refresh_drive_cache(&self) -> AppResult<MessageResponse> {
        self.client.post("/folders/gdrive/cache", &json!({})).await
    }
}
