//! # pdfvault-client
//!
//! Typed client for the document repository's REST API. Provides:
//!
//! - [`ClientContext`]: base URL, HTTP client and the admin [`Session`],
//!   constructed explicitly and shared by every endpoint group
//! - [`ApiClient`]: JSON request plumbing with bearer auth and uniform
//!   error mapping
//! - One endpoint group per admin screen (auth, folders, PDFs, users,
//!   access tags, analytics)
//! - [`BackendDriveSource`]: the drive folder listing as a
//!   [`FolderSource`](pdfvault_core::traits::FolderSource)

pub mod api;
pub mod context;
pub mod drive;
pub mod dto;
pub mod http;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use context::ClientContext;
pub use drive::BackendDriveSource;
pub use http::{ApiClient, Query};
pub use session::Session;
