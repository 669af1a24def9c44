//! User management endpoints.

use serde_json::json;

use pdfvault_core::types::PageRequest;
use pdfvault_core::AppResult;
use pdfvault_entity::user::{UpdateUser, User, UserFilter};

use crate::dto::{MessageResponse, SheetsResponse, UserEnvelope, UserListResponse};
use crate::http::{ApiClient, Query};

/// `/admin/users` and Google Sheets endpoints.
#[derive(Debug, Clone)]
pub struct UserApi {
    client: ApiClient,
}

impl UserApi {
    /// Create the endpoint group.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// One page of users matching `filter`.
    pub async fn list(
        &self,
        page: &PageRequest,
        filter: &UserFilter,
    ) -> AppResult<UserListResponse> {
        let query = Query::new()
            .push("page", page.page)
            .push("limit", page.page_size)
            .push_opt("search", filter.search.as_deref())
            .push_opt("role", filter.role.map(|r| r.as_str()));
        self.client.get_with("/admin/users", &query).await
    }

    /// Update a user.
    pub async fn update(&self, user_id: &str, update: &UpdateUser) -> AppResult<User> {
        let response: UserEnvelope = self
            .client
            .put(&format!("/admin/users/{user_id}"), update)
            .await?;
        Ok(response.user)
    }

    /// Delete a user.
    pub async fn delete(&self, user_id: &str) -> AppResult<MessageResponse> {
        self.client.delete(&format!("/admin/users/{user_id}")).await
    }

    /// Push the user list to the linked spreadsheet.
    pub async fn sync_sheets(&self) -> AppResult<SheetsResponse> {
        self.client.post("/admin/sync-sheets", &json!({})).await
    }

    /// State of the spreadsheet link.
    pub async fn sheets_status(&self) -> AppResult<SheetsResponse> {
        self.client.get("/admin/sheets-status").await
    }
}
