//! Access-tag models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tag granting access to folders, assigned to users.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTag {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Unique tag name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Category value (see the tag catalog).
    #[serde(default = "default_category")]
    pub category: String,
    /// Badge color.
    #[serde(default)]
    pub color: Option<String>,
    /// Whether the tag can currently be assigned.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Number of users and folders carrying the tag.
    #[serde(default)]
    pub usage_count: u64,
    /// When the tag was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Aggregate tag statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagStats {
    /// Total number of tags.
    #[serde(default)]
    pub total: u64,
    /// Number of active tags.
    #[serde(default)]
    pub active: u64,
    /// Number of inactive tags.
    #[serde(default)]
    pub inactive: u64,
    /// Tag count per category.
    #[serde(default)]
    pub category_breakdown: Vec<CategoryCount>,
    /// Usage totals across all tags.
    #[serde(default)]
    pub usage: TagUsage,
}

/// Usage totals across all tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagUsage {
    /// Sum of usage counts.
    #[serde(default)]
    pub total_usage: u64,
    /// Mean usage count.
    #[serde(default)]
    pub avg_usage: f64,
    /// Highest usage count.
    #[serde(default)]
    pub max_usage: u64,
}

/// Number of tags in one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCount {
    /// Category value.
    #[serde(rename = "_id")]
    pub category: String,
    /// Number of tags.
    pub count: u64,
}

/// Bulk operation over a set of tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkTagAction {
    /// Mark tags active.
    Activate,
    /// Mark tags inactive.
    Deactivate,
    /// Delete tags.
    Delete,
}

impl fmt::Display for BulkTagAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Activate => "activate",
            Self::Deactivate => "deactivate",
            Self::Delete => "delete",
        };
        f.write_str(s)
    }
}

impl FromStr for BulkTagAction {
    type Err = pdfvault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "activate" => Ok(Self::Activate),
            "deactivate" => Ok(Self::Deactivate),
            "delete" => Ok(Self::Delete),
            _ => Err(pdfvault_core::AppError::validation(format!(
                "Invalid bulk action: '{s}'. Expected one of: activate, deactivate, delete"
            ))),
        }
    }
}

/// Ordering of the tag list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagSort {
    /// Alphabetical by name.
    #[default]
    Name,
    /// By category, then name.
    Category,
    /// Most used first.
    Usage,
    /// Newest first.
    Created,
}

impl TagSort {
    /// Wire value of this ordering.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Category => "category",
            Self::Usage => "usage",
            Self::Created => "created",
        }
    }
}

impl FromStr for TagSort {
    type Err = pdfvault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "category" => Ok(Self::Category),
            "usage" => Ok(Self::Usage),
            "created" => Ok(Self::Created),
            _ => Err(pdfvault_core::AppError::validation(format!(
                "Invalid sort: '{s}'. Expected one of: name, category, usage, created"
            ))),
        }
    }
}

/// Filters of the tag list screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagFilter {
    /// Category filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Active-state filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// Name/description search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Ordering.
    #[serde(default)]
    pub sort: TagSort,
}

fn default_category() -> String {
    "other".to_string()
}

fn default_true() -> bool {
    true
}
