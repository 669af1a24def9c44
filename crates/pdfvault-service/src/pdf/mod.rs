//! PDF management screen.

pub mod service;

pub use service::PdfService;
