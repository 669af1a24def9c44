//! Source of remote folder listings.

use async_trait::async_trait;

use crate::result::AppResult;

/// Something that can list the folders of the cloud-drive hierarchy.
///
/// The listing is returned raw, exactly as the provider reports it; field
/// spellings vary between providers and are normalized by the caller.
#[async_trait]
pub trait FolderSource: Send + Sync + std::fmt::Debug + 'static {
    /// Human-readable name of the source, used in log lines.
    fn source_name(&self) -> &str;

    /// The root folder of the hierarchy.
    async fn root_folder_id(&self) -> AppResult<Option<String>>;

    /// Fetch every folder below the root.
    async fn list_folders(&self) -> AppResult<Vec<serde_json::Value>>;
}
