//! PDF listing and editing.

use tracing::info;

use pdfvault_client::api::PdfApi;
use pdfvault_client::dto::{CacheResponse, MessageResponse};
use pdfvault_core::config::CatalogConfig;
use pdfvault_core::types::PageRequest;
use pdfvault_core::{AppError, AppResult};
use pdfvault_entity::pdf::{Pdf, PdfFilter, UpdatePdf};

use crate::listing::ListPage;

/// Study years a PDF can belong to.
const YEARS: std::ops::RangeInclusive<u8> = 1..=4;

/// Lists, edits and imports PDFs.
#[derive(Debug, Clone)]
pub struct PdfService {
    api: PdfApi,
    catalog: CatalogConfig,
    page_window: usize,
}

impl PdfService {
    /// Create the service.
    pub fn new(api: PdfApi, catalog: CatalogConfig, page_window: usize) -> Self {
        Self {
            api,
            catalog,
            page_window,
        }
    }

    /// One page of PDFs.
    pub async fn list(&self, page: PageRequest, filter: &PdfFilter) -> AppResult<ListPage<Pdf>> {
        if let Some(department) = &filter.department {
            self.check_department(department)?;
        }
        if let Some(year) = filter.year {
            check_year(year)?;
        }
        let response = self.api.list(&page, filter).await?;
        Ok(ListPage::new(
            response.pdfs,
            response.pagination,
            self.page_window,
        ))
    }

    /// Update a PDF's metadata.
    pub async fn update(&self, pdf_id: &str, update: UpdatePdf) -> AppResult<Pdf> {
        if update.is_empty() {
            return Err(AppError::validation("Nothing to update"));
        }
        if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(AppError::validation("Title cannot be empty"));
        }
        if let Some(department) = &update.department {
            self.check_department(department)?;
        }
        if let Some(year) = update.year {
            check_year(year)?;
        }
        let pdf = self.api.update(pdf_id, &update).await?;
        info!(pdf_id = %pdf.id, "PDF updated");
        Ok(pdf)
    }

    /// Delete a PDF.
    pub async fn delete(&self, pdf_id: &str) -> AppResult<MessageResponse> {
        let response = self.api.delete(pdf_id).await?;
        info!(pdf_id = %pdf_id, "PDF deleted");
        Ok(response)
    }

    /// Import drive files the backend does not know yet.
    pub async fn cache_drive_files(&self) -> AppResult<CacheResponse> {
        let response = self.api.cache_drive_files().await?;
        info!(total = response.total, cached = response.cached, "Drive PDFs cached");
        Ok(response)
    }

    /// Reassign PDFs whose uploader account is gone.
    pub async fn fix_orphaned_uploaders(&self) -> AppResult<MessageResponse> {
        self.api.fix_orphaned_uploaders().await
    }

    fn check_department(&self, department: &str) -> AppResult<()> {
        if self.catalog.is_pdf_department(department) {
            Ok(())
        } else {
            Err(AppError::validation(format!(
                "Unknown department '{department}'. Expected one of: {}",
                self.catalog.pdf_departments.join(", ")
            )))
        }
    }
}

fn check_year(year: u8) -> AppResult<()> {
    if YEARS.contains(&year) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Year must be between {} and {}",
            YEARS.start(),
            YEARS.end()
        )))
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::{Path, RawQuery};
    use axum::routing::{get, put};
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use pdfvault_core::error::ErrorKind;
    use pdfvault_core::types::PageMarker;

    use super::*;
    use crate::testing::stub_client;

    async fn service(router: Router) -> PdfService {
        PdfService::new(
            PdfApi::new(stub_client(router).await),
            CatalogConfig::default(),
            5,
        )
    }

    #[tokio::test]
    async fn test_list_builds_window() {
        let router = Router::new().route(
            "/api/pdfs",
            get(|RawQuery(query): RawQuery| async move {
                assert!(query.unwrap_or_default().contains("search=networks"));
                Json(json!({
                    "pdfs": [{"_id": "p1", "title": "Computer Networks"}],
                    "pagination": {"currentPage": 7, "totalPages": 10, "totalCount": 100, "hasNext": true, "hasPrev": true}
                }))
            }),
        );
        let service = service(router).await;
        let filter = PdfFilter {
            search: Some("networks".to_string()),
            ..Default::default()
        };

        let page = service.list(PageRequest::new(7, 10), &filter).await.unwrap();
        assert_eq!(page.items[0].title, "Computer Networks");
        assert_eq!(page.window.pages[0], PageMarker::Page(1));
        assert_eq!(page.window.pages[1], PageMarker::Ellipsis);
        assert!(page.window.pages.contains(&PageMarker::Page(7)));
    }

    #[tokio::test]
    async fn test_invalid_filters_and_updates_are_rejected() {
        let service = service(Router::new()).await;

        let filter = PdfFilter {
            department: Some("MECH".to_string()),
            ..Default::default()
        };
        let err = service.list(PageRequest::default(), &filter).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = service.update("p1", UpdatePdf::default()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let update = UpdatePdf {
            year: Some(5),
            ..Default::default()
        };
        let err = service.update("p1", update).await.unwrap_err();
        assert!(err.message.contains("between 1 and 4"));
    }

    #[tokio::test]
    async fn test_update_sends_only_set_fields() {
        let router = Router::new().route(
            "/api/admin/pdfs/{id}",
            put(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                assert_eq!(body, json!({"department": "ECE", "isActive": false}));
                Json(json!({
                    "message": "PDF updated successfully",
                    "pdf": {"_id": id, "title": "Signals", "department": "ECE", "isActive": false}
                }))
            }),
        );
        let service = service(router).await;
        let update = UpdatePdf {
            department: Some("ECE".to_string()),
            is_active: Some(false),
            ..Default::default()
        };
        let pdf = service.update("p9", update).await.unwrap();
        assert_eq!(pdf.id, "p9");
        assert!(!pdf.is_active);
    }
}
