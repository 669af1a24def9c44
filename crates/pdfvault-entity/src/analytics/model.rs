//! Analytics models as reported by `GET /admin/analytics`.

use serde::{Deserialize, Serialize};

/// The full analytics payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    /// Headline counts.
    #[serde(default)]
    pub overview: Overview,
    /// PDF distribution by department and year.
    #[serde(default)]
    pub distribution: Distribution,
    /// Most viewed PDFs.
    #[serde(default)]
    pub top_pdfs: Vec<TopPdf>,
    /// Most active uploaders.
    #[serde(default)]
    pub top_uploaders: Vec<TopUploader>,
    /// Raw recent access log entries.
    #[serde(default)]
    pub recent_activity: Vec<serde_json::Value>,
}

/// Headline counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    /// Active client users.
    #[serde(default)]
    pub total_users: u64,
    /// All PDFs.
    #[serde(default)]
    pub total_pdfs: u64,
    /// Active PDFs.
    #[serde(default)]
    pub active_pdfs: u64,
    /// PDFs uploaded in the last seven days.
    #[serde(default)]
    pub recent_uploads: u64,
    /// Sum of view counts of active PDFs.
    #[serde(default)]
    pub total_views: u64,
    /// Folders known to the backend.
    #[serde(default)]
    pub total_folders: u64,
}

/// Grouped PDF counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    /// Count per department.
    #[serde(default)]
    pub by_department: Vec<GroupCount>,
    /// Count per study year.
    #[serde(default)]
    pub by_year: Vec<GroupCount>,
}

/// One aggregation bucket; the key is null for PDFs without a value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupCount {
    /// Bucket key.
    #[serde(rename = "_id")]
    pub key: serde_json::Value,
    /// Number of PDFs.
    pub count: u64,
}

impl GroupCount {
    /// Bucket key as display text.
    pub fn label(&self) -> String {
        match &self.key {
            serde_json::Value::Null => "Unknown".to_string(),
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// A most-viewed PDF.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPdf {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Title.
    pub title: String,
    /// Department.
    #[serde(default)]
    pub department: Option<String>,
    /// Study year.
    #[serde(default)]
    pub year: Option<u8>,
    /// View count.
    #[serde(default)]
    pub view_count: u64,
    /// Uploader display name.
    #[serde(default)]
    pub uploaded_by: Option<String>,
}

/// An uploader with their totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopUploader {
    /// Uploader name.
    pub name: String,
    /// Number of PDFs uploaded.
    #[serde(default)]
    pub pdf_count: u64,
    /// Views across those PDFs.
    #[serde(default)]
    pub total_views: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_bucket_label() {
        let bucket: GroupCount =
            serde_json::from_value(serde_json::json!({"_id": null, "count": 4})).unwrap();
        assert_eq!(bucket.label(), "Unknown");
        let bucket: GroupCount =
            serde_json::from_value(serde_json::json!({"_id": 2, "count": 9})).unwrap();
        assert_eq!(bucket.label(), "2");
    }
}
