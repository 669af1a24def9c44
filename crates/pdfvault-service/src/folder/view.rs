//! Shared folder state shown by the folder screen.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use pdfvault_entity::folder::{FolderRecord, FolderTree};

use super::reconcile::SyncSummary;

/// Everything the folder screen shows, published as one unit.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderSnapshot {
    /// Flat listing.
    pub folders: Vec<FolderRecord>,
    /// Tree built from the listing.
    pub tree: FolderTree,
    /// Outcome of the sync that produced the listing, if any.
    pub summary: Option<SyncSummary>,
    /// When the listing was synced.
    pub synced_at: Option<DateTime<Utc>>,
}

/// Holder of the current [`FolderSnapshot`].
///
/// Readers get an `Arc` to a complete snapshot; a sync replaces it in a
/// single write, so listing and summary never disagree.
#[derive(Debug, Default)]
pub struct FolderView {
    current: RwLock<Arc<FolderSnapshot>>,
}

impl FolderView {
    /// Create an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot.
    pub async fn snapshot(&self) -> Arc<FolderSnapshot> {
        self.current.read().await.clone()
    }

    /// Replace the snapshot.
    pub async fn publish(&self, snapshot: FolderSnapshot) {
        *self.current.write().await = Arc::new(snapshot);
    }
}
