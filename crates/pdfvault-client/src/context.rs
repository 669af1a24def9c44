//! Explicit client context shared by every endpoint group.

use std::time::Duration;

use pdfvault_core::config::ApiConfig;
use pdfvault_core::{AppError, AppResult};

use crate::session::Session;

/// Everything a request needs: where the backend lives, the HTTP client,
/// and who is logged in.
#[derive(Debug)]
pub struct ClientContext {
    /// Base URL without a trailing slash.
    base_url: String,
    /// Shared HTTP client.
    http: reqwest::Client,
    /// Admin session.
    session: Session,
}

impl ClientContext {
    /// Build a context with an explicit session.
    pub fn new(config: &ApiConfig, session: Session) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            session,
        })
    }

    /// Build a context whose session is persisted to `config.token_file`.
    pub fn from_config(config: &ApiConfig) -> AppResult<Self> {
        let session = Session::persistent(&config.token_file)?;
        Self::new(config, session)
    }

    /// Absolute URL for an API path such as `/folders`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The shared HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The admin session.
    pub fn session(&self) -> &Session {
        &self.session
    }
}
