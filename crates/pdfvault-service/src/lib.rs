//! # pdfvault-service
//!
//! Screen-level services of the admin console. Each service wraps one
//! endpoint group of `pdfvault-client` and adds the logic the screen
//! needs on top of it: input checks against the catalog, page windows,
//! and for folders the whole normalize / reconcile / tree pipeline.
//!
//! Services take their collaborators at construction time.

pub mod analytics;
pub mod folder;
pub mod listing;
pub mod pdf;
pub mod tag;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use analytics::{AnalyticsService, Highlights};
pub use folder::{FolderService, FolderSyncService, FolderView, SyncReport, SyncSummary};
pub use listing::ListPage;
pub use pdf::PdfService;
pub use tag::TagService;
pub use user::UserService;
