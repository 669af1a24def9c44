//! # pdfvault-entity
//!
//! Domain entity models for PDFVault. Every struct in this crate mirrors a
//! payload exchanged with the document repository backend, or a derived
//! value object built from one. All entities derive `Debug`, `Clone`,
//! `Serialize`, and `Deserialize`; field names follow the backend's
//! camelCase JSON.

pub mod analytics;
pub mod auth;
pub mod folder;
pub mod pdf;
pub mod tag;
pub mod user;
