//! Backend REST API configuration.

use serde::{Deserialize, Serialize};

/// Settings for reaching the document repository backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST API, including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// File the admin session token is persisted to between invocations.
    #[serde(default = "default_token_file")]
    pub token_file: String,
    /// Default page size for list screens.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Number of page buttons shown around the current page.
    #[serde(default = "default_window")]
    pub page_window: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            token_file: default_token_file(),
            page_size: default_page_size(),
            page_window: default_window(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_token_file() -> String {
    "data/admin-token".to_string()
}

fn default_page_size() -> u64 {
    10
}

fn default_window() -> usize {
    5
}
