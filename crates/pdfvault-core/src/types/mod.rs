//! Core type definitions used across the PDFVault workspace.

pub mod pagination;

pub use pagination::{PageMarker, PageRequest, PageWindow, Pagination, compute_window};
