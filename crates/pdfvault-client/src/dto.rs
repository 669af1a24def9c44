//! Request and response envelopes of the backend's REST API.
//!
//! Entities live in `pdfvault-entity`; the types here only describe how
//! the backend wraps them on the wire.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use pdfvault_core::config::catalog::is_hex_color;
use pdfvault_core::types::Pagination;
use pdfvault_entity::auth::AdminUser;
use pdfvault_entity::pdf::Pdf;
use pdfvault_entity::tag::{AccessTag, BulkTagAction};
use pdfvault_entity::user::User;

/// Error body sent with non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    /// Short error string.
    #[serde(default)]
    pub error: Option<String>,
    /// Longer explanation.
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// The most specific text the backend gave, if any.
    pub fn into_message(self) -> Option<String> {
        self.error
            .or(self.message)
            .filter(|m| !m.trim().is_empty())
    }
}

/// Bare `{ "message": ... }` acknowledgement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable acknowledgement.
    #[serde(default)]
    pub message: String,
}

/// `GET /auth/admin/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// The administrator behind the token.
    pub user: AdminUser,
}

/// `GET /folders/gdrive-base-id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseFolderResponse {
    /// Root of the drive folder hierarchy.
    #[serde(default)]
    pub base_folder_id: Option<String>,
}

/// `GET /pdfs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfListResponse {
    /// One page of PDFs.
    #[serde(default)]
    pub pdfs: Vec<Pdf>,
    /// Page bookkeeping.
    pub pagination: Pagination,
}

/// `PUT /admin/pdfs/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfEnvelope {
    /// Acknowledgement.
    #[serde(default)]
    pub message: String,
    /// The updated PDF.
    pub pdf: Pdf,
}

/// `POST /pdfs/gdrive/cache`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheResponse {
    /// Acknowledgement.
    #[serde(default)]
    pub message: String,
    /// Files seen in the drive.
    #[serde(default)]
    pub total: u64,
    /// Files newly cached.
    #[serde(default)]
    pub cached: u64,
}

/// `GET /admin/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListResponse {
    /// One page of users.
    #[serde(default)]
    pub users: Vec<User>,
    /// Page bookkeeping.
    pub pagination: Pagination,
}

/// `PUT /admin/users/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    /// Acknowledgement.
    #[serde(default)]
    pub message: String,
    /// The updated user.
    pub user: User,
}

/// `POST /admin/sync-sheets` and `GET /admin/sheets-status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetsResponse {
    /// Whether the backend reported success.
    #[serde(default)]
    pub success: bool,
    /// Acknowledgement.
    #[serde(default)]
    pub message: Option<String>,
    /// Sync details as reported by the backend.
    #[serde(default)]
    pub data: serde_json::Value,
}

/// `GET /access-tags`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagListResponse {
    /// Matching tags.
    #[serde(default)]
    pub tags: Vec<AccessTag>,
    /// Number of matching tags.
    #[serde(default)]
    pub total: u64,
}

/// `POST /access-tags` and `PUT /access-tags/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagEnvelope {
    /// Acknowledgement.
    #[serde(default)]
    pub message: String,
    /// The created or updated tag.
    pub tag: AccessTag,
}

/// Payload of `POST /access-tags`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTagRequest {
    /// Unique tag name.
    #[validate(length(min = 2, max = 50))]
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 200))]
    pub description: Option<String>,
    /// Category value.
    pub category: String,
    /// Badge color.
    #[validate(custom(function = "validate_color"))]
    pub color: String,
}

/// Payload of `PUT /access-tags/{id}`; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTagRequest {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 50))]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 200))]
    pub description: Option<String>,
    /// New category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New color.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_color"))]
    pub color: Option<String>,
    /// Activation flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UpdateTagRequest {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.color.is_none()
            && self.is_active.is_none()
    }
}

/// Payload of `POST /access-tags/bulk`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkTagRequest {
    /// Operation to apply.
    pub action: BulkTagAction,
    /// Tags to apply it to.
    pub tag_ids: Vec<String>,
}

/// Result of `POST /access-tags/bulk`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkResponse {
    /// Acknowledgement.
    #[serde(default)]
    pub message: String,
    /// Tags changed.
    #[serde(default)]
    pub modified_count: u64,
    /// Tags matched.
    #[serde(default)]
    pub matched_count: u64,
}

fn validate_color(color: &str) -> Result<(), ValidationError> {
    if is_hex_color(color) {
        Ok(())
    } else {
        Err(ValidationError::new("hex_color"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_prefers_error_field() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"Tag already exists","message":"dup"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Tag already exists"));

        let body: ErrorBody = serde_json::from_str(r#"{"message":"Access denied"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Access denied"));

        let body: ErrorBody = serde_json::from_str(r#"{"error":" "}"#).unwrap();
        assert_eq!(body.into_message(), None);
    }

    #[test]
    fn test_create_tag_validation() {
        let ok = CreateTagRequest {
            name: "CSE-2025".to_string(),
            description: None,
            category: "academic".to_string(),
            color: "#10B981".to_string(),
        };
        assert!(ok.validate().is_ok());

        let short = CreateTagRequest {
            name: "x".to_string(),
            ..ok.clone()
        };
        assert!(short.validate().is_err());

        let bad_color = CreateTagRequest {
            color: "green".to_string(),
            ..ok
        };
        let errors = bad_color.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("color"));
    }

    #[test]
    fn test_bulk_request_wire_shape() {
        let body = BulkTagRequest {
            action: BulkTagAction::Delete,
            tag_ids: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"action": "delete", "tagIds": ["a", "b"]})
        );
    }
}
