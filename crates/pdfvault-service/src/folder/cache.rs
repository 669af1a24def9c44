//! Persistence of the last synced folder listing.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use pdfvault_core::AppResult;
use pdfvault_entity::folder::FolderRecord;

/// The folder listing as of the last successful sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedFolders {
    /// When the listing was stored.
    #[serde(default)]
    pub synced_at: Option<DateTime<Utc>>,
    /// Root the listing was normalized against.
    #[serde(default)]
    pub root_id: Option<String>,
    /// The folders.
    #[serde(default)]
    pub folders: Vec<FolderRecord>,
}

/// Storage for [`CachedFolders`].
#[async_trait]
pub trait FolderCacheStore: Send + Sync + std::fmt::Debug + 'static {
    /// Load the stored listing; an absent cache is an empty listing.
    async fn load(&self) -> AppResult<CachedFolders>;

    /// Replace the stored listing.
    async fn save(&self, cache: &CachedFolders) -> AppResult<()>;
}

/// JSON file on local disk.
#[derive(Debug, Clone)]
pub struct JsonFileCacheStore {
    path: PathBuf,
}

impl JsonFileCacheStore {
    /// Store at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FolderCacheStore for JsonFileCacheStore {
    async fn load(&self) -> AppResult<CachedFolders> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No folder cache yet");
                return Ok(CachedFolders::default());
            }
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice(&bytes) {
            Ok(cache) => Ok(cache),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Folder cache is unreadable, starting empty");
                Ok(CachedFolders::default())
            }
        }
    }

    async fn save(&self, cache: &CachedFolders) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(cache)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), folders = cache.folders.len(), "Folder cache saved");
        Ok(())
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    cache: RwLock<CachedFolders>,
}

impl MemoryCacheStore {
    /// Start from `folders`.
    pub fn with_folders(folders: Vec<FolderRecord>) -> Self {
        Self {
            cache: RwLock::new(CachedFolders {
                folders,
                ..Default::default()
            }),
        }
    }
}

#[async_trait]
impl FolderCacheStore for MemoryCacheStore {
    async fn load(&self) -> AppResult<CachedFolders> {
        Ok(self.cache.read().await.clone())
    }

    async fn save(&self, cache: &CachedFolders) -> AppResult<()> {
        *self.cache.write().await = cache.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileCacheStore::new(dir.path().join("nested/folders.json"));

        assert_eq!(store.load().await.unwrap(), CachedFolders::default());

        let cache = CachedFolders {
            synced_at: Some(Utc::now()),
            root_id: Some("base".to_string()),
            folders: vec![FolderRecord::new("a", "Sem 1", None)],
        };
        store.save(&cache).await.unwrap();
        assert_eq!(store.load().await.unwrap(), cache);
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folders.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let store = JsonFileCacheStore::new(&path);
        assert!(store.load().await.unwrap().folders.is_empty());
    }
}
