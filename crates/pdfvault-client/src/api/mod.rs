//! Endpoint groups, one per admin screen.
//!
//! Each group is a thin typed wrapper over [`ApiClient`](crate::ApiClient);
//! all of them share the client's context and session.

pub mod analytics;
pub mod auth;
pub mod folders;
pub mod pdfs;
pub mod tags;
pub mod users;

pub use analytics::AnalyticsApi;
pub use auth::AuthApi;
pub use folders::FolderApi;
pub use pdfs::PdfApi;
pub use tags::TagApi;
pub use users::UserApi;
