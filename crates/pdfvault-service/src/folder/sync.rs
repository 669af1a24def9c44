//! Folder sync: fetch, reconcile, persist, publish.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use pdfvault_client::api::FolderApi;
use pdfvault_core::config::DriveConfig;
use pdfvault_core::error::ErrorKind;
use pdfvault_core::events::{EventName, RealtimeEvent};
use pdfvault_core::traits::{FolderSource, NotificationChannel};
use pdfvault_core::{AppError, AppResult};

use super::cache::{CachedFolders, FolderCacheStore};
use super::normalizer::normalize_folders;
use super::reconcile::{SyncSummary, reconcile};
use super::tree::build_folder_tree;
use super::view::{FolderSnapshot, FolderView};

/// What one sync did.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    /// Counts.
    pub summary: SyncSummary,
    /// Added folder ids.
    pub added_ids: Vec<String>,
    /// Updated folder ids.
    pub updated_ids: Vec<String>,
    /// Folder ids no longer listed.
    pub removed_ids: Vec<String>,
    /// Root the listing was normalized against.
    pub root_id: Option<String>,
    /// Whether the backend refreshed its own drive cache.
    pub backend_refreshed: bool,
    /// Whether the sync was announced on the realtime channel.
    pub announced: bool,
}

/// Runs folder syncs, one at a time.
#[derive(Debug)]
pub struct FolderSyncService {
    /// Remote listing.
    source: Arc<dyn FolderSource>,
    /// Last synced listing.
    cache: Arc<dyn FolderCacheStore>,
    /// Folder screen state.
    view: Arc<FolderView>,
    /// Backend folder endpoints, for the drive cache refresh.
    backend: Option<FolderApi>,
    /// Realtime channel for announcing syncs.
    channel: Option<Arc<dyn NotificationChannel>>,
    /// Drive settings.
    config: DriveConfig,
    /// Set while a sync runs.
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl FolderSyncService {
    /// Create the service.
    pub fn new(
        source: Arc<dyn FolderSource>,
        cache: Arc<dyn FolderCacheStore>,
        view: Arc<FolderView>,
        config: DriveConfig,
    ) -> Self {
        Self {
            source,
            cache,
            view,
            backend: None,
            channel: None,
            config,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Ask the backend to refresh its drive cache after each sync.
    pub fn with_backend(mut self, folders: FolderApi) -> Self {
        self.backend = Some(folders);
        self
    }

    /// Announce each sync on `channel`.
    pub fn with_channel(mut self, channel: Arc<dyn NotificationChannel>) -> Self {
        self.channel = Some(channel);
        self
    }

    /// The folder view this service publishes into.
    pub fn view(&self) -> &Arc<FolderView> {
        &self.view
    }

    /// Whether a sync is currently running.
    pub fn is_syncing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Publish the cached listing without contacting the drive.
    pub async fn load_cached(&self) -> AppResult<Arc<FolderSnapshot>> {
        let cached = self.cache.load().await?;
        self.view
            .publish(FolderSnapshot {
                tree: build_folder_tree(&cached.folders, None),
                folders: cached.folders,
                summary: None,
                synced_at: cached.synced_at,
            })
            .await;
        Ok(self.view.snapshot().await)
    }

    /// Run one sync.
    ///
    /// Fails with a conflict while another sync is running. A failed fetch
    /// leaves cache and view untouched.
    pub async fn sync(&self) -> AppResult<SyncReport> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(AppError::conflict("A folder sync is already in progress"));
        }
        let _guard = InFlight(&self.in_flight);

        let source = self.source.source_name().to_string();
        info!(source = %source, "Folder sync started");

        let root = self
            .source
            .root_folder_id()
            .await
            .map_err(|e| fetch_failure(&source, e))?;
        let raw = self
            .source
            .list_folders()
            .await
            .map_err(|e| fetch_failure(&source, e))?;

        let remote = normalize_folders(&raw, root.as_deref());
        let cached = self.cache.load().await?;
        let outcome = reconcile(&remote, &cached.folders);

        let synced_at = Utc::now();
        self.cache
            .save(&CachedFolders {
                synced_at: Some(synced_at),
                root_id: root.clone(),
                folders: outcome.next_cache.clone(),
            })
            .await?;

        let backend_refreshed = self.refresh_backend().await;

        self.view
            .publish(FolderSnapshot {
                tree: build_folder_tree(&outcome.next_cache, None),
                folders: outcome.next_cache,
                summary: Some(outcome.summary),
                synced_at: Some(synced_at),
            })
            .await;

        let announced = self.announce(&outcome.summary).await;

        info!(
            added = outcome.summary.added,
            updated = outcome.summary.updated,
            removed = outcome.summary.removed,
            total = outcome.summary.total,
            "Folder sync finished"
        );

        Ok(SyncReport {
            summary: outcome.summary,
            added_ids: outcome.added_ids,
            updated_ids: outcome.updated_ids,
            removed_ids: outcome.removed_ids,
            root_id: root,
            backend_refreshed,
            announced,
        })
    }

    async fn refresh_backend(&self) -> bool {
        let Some(backend) = self.backend.as_ref().filter(|_| self.config.refresh_backend_cache)
        else {
            return false;
        };
        match backend.refresh_drive_cache().await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Backend drive cache refresh failed");
                false
            }
        }
    }

    async fn announce(&self, summary: &SyncSummary) -> bool {
        let Some(channel) = self.channel.as_ref().filter(|_| self.config.announce_sync) else {
            return false;
        };
        if !channel.is_connected() {
            return false;
        }
        let event = RealtimeEvent::new(EventName::AdminFolderUpdate, json!({ "summary": summary }));
        match channel.emit(event).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Folder sync announcement failed");
                false
            }
        }
    }
}

/// Keep authentication failures as they are; everything else is the
/// drive being unreachable.
fn fetch_failure(source: &str, err: AppError) -> AppError {
    if err.kind == ErrorKind::Authentication {
        return err;
    }
    AppError::with_source(
        ErrorKind::ExternalService,
        format!("Failed to fetch folders from {source}: {}", err.message),
        err,
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{Value, json};
    use tokio::sync::Notify;

    use pdfvault_entity::folder::FolderRecord;
    use pdfvault_realtime::MemoryChannel;

    use super::*;
    use crate::folder::cache::MemoryCacheStore;

    /// Scripted drive listing.
    #[derive(Debug, Default)]
    struct ScriptedSource {
        listing: Mutex<Vec<Value>>,
        fail: AtomicBool,
        gate: Option<Arc<Notify>>,
    }

    impl ScriptedSource {
        fn with(listing: Vec<Value>) -> Self {
            Self {
                listing: Mutex::new(listing),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl FolderSource for ScriptedSource {
        fn source_name(&self) -> &str {
            "scripted"
        }

        async fn root_folder_id(&self) -> AppResult<Option<String>> {
            Ok(Some("base".to_string()))
        }

        async fn list_folders(&self) -> AppResult<Vec<Value>> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.fail.load(Ordering::SeqCst) {
                return Err(AppError::external_service("drive quota exceeded"));
            }
            Ok(self.listing.lock().unwrap().clone())
        }
    }

    fn service(source: Arc<ScriptedSource>, cache: Arc<MemoryCacheStore>) -> FolderSyncService {
        FolderSyncService::new(
            source,
            cache,
            Arc::new(FolderView::new()),
            DriveConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_sync_publishes_listing_tree_and_summary() {
        let source = Arc::new(ScriptedSource::with(vec![
            json!({"id": "1", "name": "Math", "parents": ["base"]}),
            json!({"id": "2", "name": "CS", "parents": ["base"]}),
            json!({"id": "3", "name": "Algebra", "parents": ["1"]}),
        ]));
        let cache = Arc::new(MemoryCacheStore::with_folders(vec![FolderRecord::new(
            "1", "Math", None,
        )]));
        let service = service(source, cache.clone());

        let report = service.sync().await.unwrap();
        assert_eq!(
            report.summary,
            SyncSummary {
                added: 2,
                updated: 0,
                removed: 0,
                total: 3
            }
        );
        assert_eq!(report.root_id.as_deref(), Some("base"));
        assert!(!report.backend_refreshed);
        assert!(!report.announced);

        let snapshot = service.view().snapshot().await;
        assert_eq!(snapshot.folders.len(), 3);
        assert_eq!(snapshot.tree.roots.len(), 2);
        assert_eq!(snapshot.tree.roots[0].children[0].folder.name, "Algebra");
        assert_eq!(snapshot.summary, Some(report.summary));

        let stored = cache.load().await.unwrap();
        assert_eq!(stored.folders, snapshot.folders);
        assert_eq!(stored.root_id.as_deref(), Some("base"));

        // Second run over the same listing changes nothing.
        let again = service.sync().await.unwrap();
        assert!(!again.summary.has_changes());
        assert_eq!(again.summary.total, 3);
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_state_untouched() {
        let source = Arc::new(ScriptedSource::with(vec![json!({"id": "9", "name": "New"})]));
        source.fail.store(true, Ordering::SeqCst);
        let previous = vec![FolderRecord::new("1", "Math", None)];
        let cache = Arc::new(MemoryCacheStore::with_folders(previous.clone()));
        let service = service(source.clone(), cache.clone());

        let err = service.sync().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
        assert!(err.message.contains("drive quota exceeded"));
        assert_eq!(cache.load().await.unwrap().folders, previous);
        assert!(service.view().snapshot().await.summary.is_none());
        assert!(!service.is_syncing());

        source.fail.store(false, Ordering::SeqCst);
        assert!(service.sync().await.is_ok());
    }

    #[tokio::test]
    async fn test_second_sync_is_rejected_while_running() {
        let gate = Arc::new(Notify::new());
        let source = Arc::new(ScriptedSource {
            gate: Some(gate.clone()),
            ..Default::default()
        });
        let service = Arc::new(service(source, Arc::new(MemoryCacheStore::default())));

        let running = tokio::spawn({
            let service = service.clone();
            async move { service.sync().await }
        });
        while !service.is_syncing() {
            tokio::task::yield_now().await;
        }

        let err = service.sync().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        gate.notify_one();
        running.await.unwrap().unwrap();
        assert!(!service.is_syncing());
    }

    #[tokio::test]
    async fn test_sync_is_announced_when_connected() {
        let source = Arc::new(ScriptedSource::with(vec![json!({"id": "1", "name": "Math"})]));
        let channel = Arc::new(MemoryChannel::default());
        let service = service(source, Arc::new(MemoryCacheStore::default()))
            .with_channel(channel.clone());

        assert!(!service.sync().await.unwrap().announced);

        channel.connect().await.unwrap();
        assert!(service.sync().await.unwrap().announced);
        let emitted = channel.emitted().await;
        assert_eq!(emitted.len(), 1);
        assert!(emitted[0].is(EventName::AdminFolderUpdate));
        assert_eq!(emitted[0].data["summary"]["total"], 1);
    }

    #[tokio::test]
    async fn test_load_cached_publishes_without_fetching() {
        let source = Arc::new(ScriptedSource::default());
        source.fail.store(true, Ordering::SeqCst);
        let cache = Arc::new(MemoryCacheStore::with_folders(vec![
            FolderRecord::new("a", "Sem 1", None),
            FolderRecord::new("b", "Maths", Some("a")),
        ]));
        let service = service(source, cache);

        let snapshot = service.load_cached().await.unwrap();
        assert_eq!(snapshot.tree.total_folders, 2);
        assert!(snapshot.summary.is_none());
    }
}
