//! # pdfvault-api
//!
//! axum layers for services that stream PDFs to browsers:
//!
//! - [`pdf_security_headers`]: anti-download and anti-embedding headers on
//!   PDF responses
//! - [`disable_pdf_caching`]: cache suppression on viewing and streaming
//!   responses
//! - [`apply_pdf_security`]: both of the above plus request logging and
//!   tracing, driven by [`SecurityConfig`](pdfvault_core::config::SecurityConfig)
//! - [`ApiError`]: `AppError` rendered as a JSON body with the matching status

pub mod error;
pub mod middleware;
pub mod router;

pub use error::{ApiError, ApiErrorResponse};
pub use middleware::pdf_security::{disable_pdf_caching, pdf_security_headers};
pub use router::apply_pdf_security;
