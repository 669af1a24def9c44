//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field carries a serde default, so an empty file (or no
//! file at all) yields a usable configuration.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod drive;
pub mod logging;
pub mod realtime;
pub mod security;

use serde::{Deserialize, Serialize};

pub use self::api::ApiConfig;
pub use self::cache::CacheConfig;
pub use self::catalog::{CatalogConfig, TagCategoryConfig};
pub use self::drive::DriveConfig;
pub use self::logging::LoggingConfig;
pub use self::realtime::RealtimeConfig;
pub use self::security::SecurityConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (base file + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend REST API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Cloud-drive folder settings.
    #[serde(default)]
    pub drive: DriveConfig,
    /// Realtime notification channel settings.
    #[serde(default)]
    pub realtime: RealtimeConfig,
    /// Local cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// PDF response security header settings.
    #[serde(default)]
    pub security: SecurityConfig,
    /// Access-tag category and color table.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the base file at `path` with an environment-specific overlay
    /// (`config/{env}.toml`) and environment variables prefixed with
    /// `PDFVAULT__`. Missing files are not an error.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("PDFVAULT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.realtime.reconnect_attempts, 5);
        assert_eq!(config.logging.level, "info");
        assert!(config.security.enabled);
        assert_eq!(config.catalog.categories.len(), 8);
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [api]
            base_url = "https://vault.example.edu/api"
            timeout_seconds = 5

            [drive]
            base_folder_id = "1AbCdEf"

            [logging]
            format = "pretty"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://vault.example.edu/api");
        assert_eq!(config.api.timeout_seconds, 5);
        assert_eq!(config.drive.base_folder_id.as_deref(), Some("1AbCdEf"));
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.logging.level, "info");
    }
}
