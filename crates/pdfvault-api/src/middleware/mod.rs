//! Axum middleware stack.

pub mod logging;
pub mod pdf_security;
