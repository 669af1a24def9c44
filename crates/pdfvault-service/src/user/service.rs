//! User listing, role and activation changes, spreadsheet sync.

use tracing::info;

use pdfvault_client::api::UserApi;
use pdfvault_client::dto::{MessageResponse, SheetsResponse};
use pdfvault_core::types::PageRequest;
use pdfvault_core::{AppError, AppResult};
use pdfvault_entity::user::{UpdateUser, User, UserFilter, UserRole};

use crate::listing::ListPage;

/// Page size used when looking a user up by id.
const LOOKUP_PAGE_SIZE: u64 = 100;

/// Lists and administers users.
#[derive(Debug, Clone)]
pub struct UserService {
    api: UserApi,
    page_window: usize,
}

impl UserService {
    /// Create the service.
    pub fn new(api: UserApi, page_window: usize) -> Self {
        Self { api, page_window }
    }

    /// One page of users.
    pub async fn list(&self, page: PageRequest, filter: &UserFilter) -> AppResult<ListPage<User>> {
        let response = self.api.list(&page, filter).await?;
        Ok(ListPage::new(
            response.users,
            response.pagination,
            self.page_window,
        ))
    }

    /// Find a user by id, walking the full list.
    pub async fn find(&self, user_id: &str) -> AppResult<User> {
        let filter = UserFilter::default();
        let mut page = 1;
        loop {
            let response = self
                .api
                .list(&PageRequest::new(page, LOOKUP_PAGE_SIZE), &filter)
                .await?;
            if let Some(user) = response.users.into_iter().find(|u| u.id == user_id) {
                return Ok(user);
            }
            if !response.pagination.has_next || page >= response.pagination.total_pages {
                return Err(AppError::not_found(format!("User '{user_id}' not found")));
            }
            page += 1;
        }
    }

    /// Switch a user between client and admin.
    pub async fn toggle_role(&self, user_id: &str) -> AppResult<User> {
        let user = self.find(user_id).await?;
        self.set_role(&user.id, user.role.toggled()).await
    }

    /// Give a user `role`.
    pub async fn set_role(&self, user_id: &str, role: UserRole) -> AppResult<User> {
        let update = UpdateUser {
            role: Some(role),
            ..Default::default()
        };
        let user = self.api.update(user_id, &update).await?;
        info!(user_id = %user.id, role = %user.role, "User role changed");
        Ok(user)
    }

    /// Activate or deactivate a user.
    pub async fn set_active(&self, user_id: &str, active: bool) -> AppResult<User> {
        let update = UpdateUser {
            is_active: Some(active),
            ..Default::default()
        };
        let user = self.api.update(user_id, &update).await?;
        info!(user_id = %user.id, active, "User activation changed");
        Ok(user)
    }

    /// Delete a user.
    pub async fn delete(&self, user_id: &str) -> AppResult<MessageResponse> {
        let response = self.api.delete(user_id).await?;
        info!(user_id = %user_id, "User deleted");
        Ok(response)
    }

    /// Push users to the linked spreadsheet.
    pub async fn sync_sheets(&self) -> AppResult<SheetsResponse> {
        let response = self.api.sync_sheets().await?;
        if !response.success {
            return Err(AppError::external_service(
                response
                    .message
                    .unwrap_or_else(|| "Spreadsheet sync failed".to_string()),
            ));
        }
        Ok(response)
    }

    /// State of the spreadsheet link.
    pub async fn sheets_status(&self) -> AppResult<SheetsResponse> {
        self.api.sheets_status().await
    }
}
