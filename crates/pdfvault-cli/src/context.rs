//! Wiring of configuration, session and services for one CLI run.

use std::sync::Arc;

use pdfvault_client::api::{AnalyticsApi, AuthApi, FolderApi, PdfApi, TagApi, UserApi};
use pdfvault_client::{ApiClient, BackendDriveSource, ClientContext};
use pdfvault_core::AppResult;
use pdfvault_core::config::AppConfig;
use pdfvault_core::types::PageRequest;
use pdfvault_realtime::WsChannel;
use pdfvault_service::folder::{FolderService, FolderSyncService, FolderView, JsonFileCacheStore};
use pdfvault_service::{AnalyticsService, PdfService, TagService, UserService};

/// Configuration plus the shared API client.
#[derive(Debug, Clone)]
pub struct CliContext {
    /// Loaded configuration.
    pub config: AppConfig,
    client: ApiClient,
}

impl CliContext {
    /// Build the context, restoring the stored admin session.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let client = ApiClient::new(ClientContext::from_config(&config.api)?);
        Ok(Self { config, client })
    }

    /// The shared API client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Request for `page` with the configured page size.
    pub fn page(&self, page: u64) -> PageRequest {
        PageRequest::new(page, self.config.api.page_size)
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.client.clone())
    }

    pub fn folders(&self) -> FolderService {
        FolderService::new(FolderApi::new(self.client.clone()))
    }

    pub fn pdfs(&self) -> PdfService {
        PdfService::new(
            PdfApi::new(self.client.clone()),
            self.config.catalog.clone(),
            self.config.api.page_window,
        )
    }

    pub fn users(&self) -> UserService {
        UserService::new(UserApi::new(self.client.clone()), self.config.api.page_window)
    }

    pub fn tags(&self) -> TagService {
        TagService::new(TagApi::new(self.client.clone()), self.config.catalog.clone())
    }

    pub fn analytics(&self) -> AnalyticsService {
        AnalyticsService::new(AnalyticsApi::new(self.client.clone()))
    }

    /// Realtime channel authenticated with the stored token.
    pub fn channel(&self) -> AppResult<WsChannel> {
        WsChannel::new(&self.config.realtime, self.client.context().session().token())
    }

    /// Folder sync backed by the drive listing and the on-disk cache.
    ///
    /// The realtime channel is attached only when `channel` is given.
    pub fn folder_sync(&self, channel: Option<Arc<WsChannel>>) -> FolderSyncService {
        let source = Arc::new(BackendDriveSource::new(
            self.client.clone(),
            &self.config.drive,
        ));
        let cache = Arc::new(JsonFileCacheStore::new(&self.config.cache.folder_cache_path));
        let service = FolderSyncService::new(
            source,
            cache,
            Arc::new(FolderView::new()),
            self.config.drive.clone(),
        )
        .with_backend(FolderApi::new(self.client.clone()));

        match channel {
            Some(channel) => service.with_channel(channel),
            None => service,
        }
    }
}
