//! Folder hierarchy: normalization, tree building, sync reconciliation,
//! the cached listing and the folder screen.

pub mod cache;
pub mod normalizer;
pub mod reconcile;
pub mod service;
pub mod sync;
pub mod tree;
pub mod view;

pub use cache::{CachedFolders, FolderCacheStore, JsonFileCacheStore, MemoryCacheStore};
pub use normalizer::normalize_folders;
pub use reconcile::{Reconciliation, SyncSummary, reconcile};
pub use service::{FolderEdit, FolderService};
pub use sync::{FolderSyncService, SyncReport};
pub use tree::{build_folder_tree, build_tree, render_tree_lines};
pub use view::{FolderSnapshot, FolderView};
