//! Layering of the PDF protections onto an application router.

use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn;
use axum::middleware::from_fn_with_state;
use tower_http::trace::TraceLayer;

use pdfvault_core::config::SecurityConfig;

use crate::middleware::{logging, pdf_security};

/// Wrap `router` with the PDF protections, request logging and tracing.
///
/// When a path matches both fragment sets the cache suppression headers
/// win, since that layer runs outermost.
pub fn apply_pdf_security<S>(router: Router<S>, config: &SecurityConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let config = Arc::new(config.clone());
    router
        .layer(from_fn_with_state(
            config.clone(),
            pdf_security::pdf_security_headers,
        ))
        .layer(from_fn_with_state(config, pdf_security::disable_pdf_caching))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(logging::request_logging))
}
