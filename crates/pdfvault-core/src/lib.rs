//! # pdfvault-core
//!
//! Core crate for the PDFVault admin tooling. Contains configuration
//! schemas, the unified error system, pagination types (including the
//! page-window calculator), realtime event definitions, and the traits
//! that external collaborators are reached through.
//!
//! This crate has **no** internal dependencies on other PDFVault crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
