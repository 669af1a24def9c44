//! Dashboard analytics.

use pdfvault_core::AppResult;
use pdfvault_entity::analytics::Analytics;

use crate::http::ApiClient;

/// `/admin/analytics` endpoint.
#[derive(Debug, Clone)]
pub struct AnalyticsApi {
    client: ApiClient,
}

impl AnalyticsApi {
    /// Create the endpoint group.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch the analytics overview.
    pub async fn fetch(&self) -> AppResult<Analytics> {
        self.client.get("/admin/analytics").await
    }
}
