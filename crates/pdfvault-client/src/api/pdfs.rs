//! PDF management endpoints.

use serde_json::json;

use pdfvault_core::types::PageRequest;
use pdfvault_core::AppResult;
use pdfvault_entity::pdf::{Pdf, PdfFilter, UpdatePdf};

use crate::dto::{CacheResponse, MessageResponse, PdfEnvelope, PdfListResponse};
use crate::http::{ApiClient, Query};

/// `/pdfs` and `/admin/pdfs` endpoints.
#[derive(Debug, Clone)]
pub struct PdfApi {
    client: ApiClient,
}

impl PdfApi {
    /// Create the endpoint group.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// One page of PDFs matching `filter`.
    pub async fn list(&self, page: &PageRequest, filter: &PdfFilter) -> AppResult<PdfListResponse> {
        let query = Query::new()
            .push("page", page.page)
            .push("limit", page.page_size)
            .push_opt("search", filter.search.as_deref())
            .push_opt("department", filter.department.as_deref())
            .push_opt("year", filter.year);
        self.client.get_with("/pdfs", &query).await
    }

    /// Update a PDF's metadata.
    pub async fn update(&self, pdf_id: &str, update: &UpdatePdf) -> AppResult<Pdf> {
        let response: PdfEnvelope = self
            .client
            .put(&format!("/admin/pdfs/{pdf_id}"), update)
            .await?;
        Ok(response.pdf)
    }

    /// Delete a PDF.
    pub async fn delete(&self, pdf_id: &str) -> AppResult<MessageResponse> {
        self.client.delete(&format!("/admin/pdfs/{pdf_id}")).await
    }

    /// Import drive files that the backend does not know yet.
    pub async fn cache_drive_files(&self) -> AppResult<CacheResponse> {
        self.client.post("/pdfs/gdrive/cache", &json!({})).await
    }

    /// Reassign PDFs whose uploader no longer exists.
    pub async fn fix_orphaned_uploaders(&self) -> AppResult<MessageResponse> {
        self.client
            .post("/admin/fix-orphaned-uploaders", &json!({}))
            .await
    }
}
