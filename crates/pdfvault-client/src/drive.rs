//! The backend's drive listing as a [`FolderSource`].

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use pdfvault_core::config::DriveConfig;
use pdfvault_core::traits::FolderSource;
use pdfvault_core::AppResult;

use crate::api::FolderApi;
use crate::http::ApiClient;

/// Lists drive folders through `GET /folders/gdrive`.
///
/// The root folder comes from configuration when set, otherwise from the
/// backend.
#[derive(Debug, Clone)]
pub struct BackendDriveSource {
    folders: FolderApi,
    configured_root: Option<String>,
}

impl BackendDriveSource {
    /// Create a source over `client`.
    pub fn new(client: ApiClient, config: &DriveConfig) -> Self {
        Self {
            folders: FolderApi::new(client),
            configured_root: config.base_folder_id.clone().filter(|id| !id.is_empty()),
        }
    }
}

#[async_trait]
impl FolderSource for BackendDriveSource {
    fn source_name(&self) -> &str {
        "backend-gdrive"
    }

    async fn root_folder_id(&self) -> AppResult<Option<String>> {
        if let Some(root) = &self.configured_root {
            return Ok(Some(root.clone()));
        }
        self.folders.drive_base_id().await
    }

    async fn list_folders(&self) -> AppResult<Vec<Value>> {
        let folders = self.folders.list_drive_folders().await?;
        debug!(count = folders.len(), "Fetched drive folder listing");
        Ok(folders)
    }
}

#[cfg(test)]
mod tests {
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    use super::*;
    use crate::testing::{client_for, spawn_stub};

    #[tokio::test]
    async fn test_configured_root_wins_over_backend() {
        let router = Router::new().route(
            "/api/folders/gdrive-base-id",
            get(|| async { Json(json!({"baseFolderId": "from-backend"})) }),
        );
        let base = spawn_stub(router).await;

        let fallback = BackendDriveSource::new(client_for(&base), &DriveConfig::default());
        assert_eq!(
            fallback.root_folder_id().await.unwrap().as_deref(),
            Some("from-backend")
        );

        let config = DriveConfig {
            base_folder_id: Some("configured".to_string()),
            ..Default::default()
        };
        let configured = BackendDriveSource::new(client_for(&base), &config);
        assert_eq!(
            configured.root_folder_id().await.unwrap().as_deref(),
            Some("configured")
        );
    }
}
