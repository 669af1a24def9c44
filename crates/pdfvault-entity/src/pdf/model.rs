//! PDF document model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A PDF document held by the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pdf {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Stored file name.
    #[serde(default)]
    pub file_name: String,
    /// Name of the file as uploaded.
    #[serde(default)]
    pub original_name: Option<String>,
    /// File size in bytes.
    #[serde(default)]
    pub file_size: u64,
    /// Owning department.
    #[serde(default)]
    pub department: Option<String>,
    /// Study year (1-4); unknown for PDFs imported from the drive.
    #[serde(default)]
    pub year: Option<u8>,
    /// Subject name.
    #[serde(default)]
    pub subject: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Uploader, either an id or a populated user object.
    #[serde(default)]
    pub uploaded_by: Option<serde_json::Value>,
    /// Drive file backing this PDF.
    #[serde(default)]
    pub google_drive_file_id: Option<String>,
    /// Drive folder the file lives in.
    #[serde(default)]
    pub google_drive_folder_id: Option<String>,
    /// Whether the PDF is visible to clients.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Number of views.
    #[serde(default)]
    pub view_count: u64,
    /// Number of downloads.
    #[serde(default)]
    pub download_count: u64,
    /// When the PDF was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Pdf {
    /// Display name of the uploader, if the backend populated it.
    pub fn uploader_name(&self) -> Option<&str> {
        match self.uploaded_by.as_ref()? {
            serde_json::Value::Object(map) => map
                .get("name")
                .or_else(|| map.get("email"))
                .and_then(|v| v.as_str()),
            serde_json::Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Editable PDF fields; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePdf {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New department.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// New study year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u8>,
    /// New subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Replacement tag list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Visibility flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UpdatePdf {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.department.is_none()
            && self.year.is_none()
            && self.subject.is_none()
            && self.tags.is_none()
            && self.is_active.is_none()
    }
}

/// Filters of the PDF list screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PdfFilter {
    /// Free-text search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Department filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Year filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u8>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_payload() {
        let pdf: Pdf = serde_json::from_value(serde_json::json!({
            "_id": "65f0",
            "title": "Operating Systems Notes",
            "fileName": "os.pdf",
            "fileSize": 1024,
            "department": "CSE",
            "year": null,
            "uploadedBy": {"_id": "u1", "name": "Asha"},
            "viewCount": 12
        }))
        .unwrap();
        assert_eq!(pdf.id, "65f0");
        assert_eq!(pdf.year, None);
        assert!(pdf.is_active);
        assert_eq!(pdf.uploader_name(), Some("Asha"));
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let update = UpdatePdf {
            subject: Some("Networks".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"subject": "Networks"})
        );
    }
}
