//! Access-tag endpoints.

use validator::Validate;

use pdfvault_core::AppResult;
use pdfvault_entity::tag::{AccessTag, TagFilter, TagStats};

use crate::dto::{
    BulkResponse, BulkTagRequest, CreateTagRequest, MessageResponse, TagEnvelope,
    TagListResponse, UpdateTagRequest,
};
use crate::http::{ApiClient, Query};

/// `/access-tags` endpoints.
#[derive(Debug, Clone)]
pub struct TagApi {
    client: ApiClient,
}

impl TagApi {
    /// Create the endpoint group.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Tags matching `filter`, in the requested order.
    pub async fn list(&self, filter: &TagFilter) -> AppResult<TagListResponse> {
        let query = Query::new()
            .push_opt("category", filter.category.as_deref())
            .push_opt("active", filter.active)
            .push_opt("search", filter.search.as_deref())
            .push("sort", filter.sort.as_str());
        self.client.get_with("/access-tags", &query).await
    }

    /// Aggregate statistics.
    pub async fn stats(&self) -> AppResult<TagStats> {
        self.client.get("/access-tags/stats").await
    }

    /// Active tags that can be assigned.
    pub async fn available(
        &self,
        category: Option<&str>,
        search: Option<&str>,
    ) -> AppResult<Vec<AccessTag>> {
        let query = Query::new()
            .push_opt("category", category)
            .push_opt("search", search);
        self.client.get_with("/access-tags/available", &query).await
    }

    /// Tags of one category.
    pub async fn by_category(&self, category: &str) -> AppResult<Vec<AccessTag>> {
        self.client
            .get(&format!("/access-tags/category/{category}"))
            .await
    }

    /// Most used tags.
    pub async fn popular(&self, limit: u32) -> AppResult<Vec<AccessTag>> {
        let query = Query::new().push("limit", limit);
        self.client.get_with("/access-tags/popular", &query).await
    }

    /// Create a tag. The request is validated before it is sent.
    pub async fn create(&self, request: &CreateTagRequest) -> AppResult<AccessTag> {
        request.validate()?;
        let response: TagEnvelope = self.client.post("/access-tags", request).await?;
        Ok(response.tag)
    }

    /// Update a tag. The request is validated before it is sent.
    pub async fn update(&self, tag_id: &str, request: &UpdateTagRequest) -> AppResult<AccessTag> {
        request.validate()?;
        let response: TagEnvelope = self
            .client
            .put(&format!("/access-tags/{tag_id}"), request)
            .await?;
        Ok(response.tag)
    }

    /// Delete a tag.
    pub async fn delete(&self, tag_id: &str) -> AppResult<MessageResponse> {
        self.client.delete(&format!("/access-tags/{tag_id}")).await
    }

    /// Apply one action to many tags.
    pub async fn bulk(&self, request: &BulkTagRequest) -> AppResult<BulkResponse> {
        self.client.post("/access-tags/bulk", request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    use pdfvault_core::error::ErrorKind;

    use super::*;
    use crate::testing::{client_for, spawn_stub};

    #[tokio::test]
    async fn test_invalid_tag_is_rejected_before_sending() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/api/access-tags",
            post(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Json(json!({"message": "created", "tag": {"_id": "t", "name": "x"}}))
                }
            }),
        );
        let base = spawn_stub(router).await;
        let api = TagApi::new(client_for(&base));

        let request = CreateTagRequest {
            name: "CSE".to_string(),
            description: None,
            category: "department".to_string(),
            color: "blue".to_string(),
        };
        let err = api.create(&request).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
