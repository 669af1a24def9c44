//! PDF response security header configuration.

use serde::{Deserialize, Serialize};

/// Which requests receive the PDF protection headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Master switch for both header layers.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Path fragments that mark a PDF response.
    #[serde(default = "default_pdf_fragments")]
    pub pdf_path_fragments: Vec<String>,
    /// Path fragments that mark a viewing/streaming response, which must
    /// never be cached.
    #[serde(default = "default_no_cache_fragments")]
    pub no_cache_path_fragments: Vec<String>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pdf_path_fragments: default_pdf_fragments(),
            no_cache_path_fragments: default_no_cache_fragments(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_pdf_fragments() -> Vec<String> {
    vec!["/pdf".to_string(), ".pdf".to_string()]
}

fn default_no_cache_fragments() -> Vec<String> {
    vec!["/view".to_string(), "/stream".to_string()]
}
