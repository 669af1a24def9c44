//! Protection headers for PDF responses.
//!
//! Both middlewares decide by substring match on the request path and set
//! their headers on the way out, replacing whatever the handler set.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::http::header::{self, HeaderMap, HeaderName};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use tracing::debug;

use pdfvault_core::config::SecurityConfig;

const NO_STORE: &str = "private, no-cache, no-store, must-revalidate";
const NO_STORE_MAX_AGE_0: &str = "private, no-cache, no-store, must-revalidate, max-age=0";
const PDF_CSP: &str =
    "default-src 'none'; object-src 'none'; script-src 'none'; style-src 'unsafe-inline';";
const PERMISSIONS_POLICY: &str =
    "document-domain=(), camera=(), microphone=(), geolocation=()";

/// Format of the `Last-Modified` header (IMF-fixdate).
const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

fn matches_any(path: &str, fragments: &[String]) -> bool {
    fragments
        .iter()
        .any(|f| !f.is_empty() && path.contains(f.as_str()))
}

fn set(headers: &mut HeaderMap, name: HeaderName, value: &'static str) {
    headers.insert(name, HeaderValue::from_static(value));
}

/// Adds anti-sniffing, anti-framing and no-store headers to responses
/// whose path contains one of `pdf_path_fragments`.
pub async fn pdf_security_headers(
    State(config): State<Arc<SecurityConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let protect = config.enabled && matches_any(request.uri().path(), &config.pdf_path_fragments);
    let mut response = next.run(request).await;
    if !protect {
        return response;
    }

    let headers = response.headers_mut();
    set(headers, header::X_CONTENT_TYPE_OPTIONS, "nosniff");
    set(headers, header::X_FRAME_OPTIONS, "DENY");
    set(headers, HeaderName::from_static("x-download-options"), "noopen");
    set(headers, header::CACHE_CONTROL, NO_STORE);
    set(headers, header::PRAGMA, "no-cache");
    set(headers, header::EXPIRES, "0");
    set(headers, header::CONTENT_SECURITY_POLICY, PDF_CSP);
    set(headers, header::REFERRER_POLICY, "no-referrer");
    set(
        headers,
        HeaderName::from_static("permissions-policy"),
        PERMISSIONS_POLICY,
    );
    debug!("PDF security headers applied");
    response
}

/// Stamps viewing and streaming responses (paths containing one of
/// `no_cache_path_fragments`) as uncacheable and freshly modified.
pub async fn disable_pdf_caching(
    State(config): State<Arc<SecurityConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let protect =
        config.enabled && matches_any(request.uri().path(), &config.no_cache_path_fragments);
    let mut response = next.run(request).await;
    if !protect {
        return response;
    }

    let headers = response.headers_mut();
    set(headers, header::CACHE_CONTROL, NO_STORE_MAX_AGE_0);
    set(headers, header::PRAGMA, "no-cache");
    set(headers, header::EXPIRES, "0");
    if let Ok(now) = HeaderValue::from_str(&Utc::now().format(HTTP_DATE).to_string()) {
        headers.insert(header::LAST_MODIFIED, now);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_matching() {
        let config = SecurityConfig::default();
        assert!(matches_any("/api/pdfs/1", &config.pdf_path_fragments));
        assert!(matches_any("/files/notes.pdf", &config.pdf_path_fragments));
        assert!(!matches_any("/api/users", &config.pdf_path_fragments));
        assert!(matches_any("/api/pdfs/1/view", &config.no_cache_path_fragments));
        assert!(!matches_any("/anything", &[String::new()]));
    }
}
