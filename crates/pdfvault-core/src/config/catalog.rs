//! Shared lookup tables: access-tag categories, tag colors, departments.
//!
//! Every screen reads these from here instead of carrying its own literals.

use serde::{Deserialize, Serialize};

/// One access-tag category with its display label and color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCategoryConfig {
    /// Wire value stored on the tag (e.g. `"special-group"`).
    pub value: String,
    /// Human-readable label.
    pub label: String,
    /// Hex color used for the category badge.
    pub color: String,
}

/// Category, color and department tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Known access-tag categories, in display order.
    #[serde(default = "default_categories")]
    pub categories: Vec<TagCategoryConfig>,
    /// Category assigned when none is given or an unknown one is looked up.
    #[serde(default = "default_category")]
    pub default_category: String,
    /// Color assigned to a new tag when none is given.
    #[serde(default = "default_color")]
    pub default_color: String,
    /// Color palette offered for tags.
    #[serde(default = "default_palette")]
    pub predefined_colors: Vec<String>,
    /// Departments a PDF can belong to.
    #[serde(default = "default_pdf_departments")]
    pub pdf_departments: Vec<String>,
    /// Departments a user can belong to.
    #[serde(default = "default_user_departments")]
    pub user_departments: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            default_category: default_category(),
            default_color: default_color(),
            predefined_colors: default_palette(),
            pdf_departments: default_pdf_departments(),
            user_departments: default_user_departments(),
        }
    }
}

impl CatalogConfig {
    /// Look up a category, falling back to the default category.
    ///
    /// Returns `None` only when the table does not even contain the default.
    pub fn category(&self, value: &str) -> Option<&TagCategoryConfig> {
        self.categories
            .iter()
            .find(|c| c.value == value)
            .or_else(|| {
                self.categories
                    .iter()
                    .find(|c| c.value == self.default_category)
            })
    }

    /// Whether `value` names a known category.
    pub fn is_known_category(&self, value: &str) -> bool {
        self.categories.iter().any(|c| c.value == value)
    }

    /// Whether `department` is a valid PDF department.
    pub fn is_pdf_department(&self, department: &str) -> bool {
        self.pdf_departments.iter().any(|d| d == department)
    }
}

/// Whether `color` is a `#RGB` or `#RRGGBB` hex color.
pub fn is_hex_color(color: &str) -> bool {
    let Some(digits) = color.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

fn category(value: &str, label: &str, color: &str) -> TagCategoryConfig {
    TagCategoryConfig {
        value: value.to_string(),
        label: label.to_string(),
        color: color.to_string(),
    }
}

fn default_categories() -> Vec<TagCategoryConfig> {
    vec![
        category("academic", "Academic", "#10B981"),
        category("department", "Department", "#F59E0B"),
        category("special-group", "Special Group", "#8B5CF6"),
        category("course", "Course", "#06B6D4"),
        category("project", "Project", "#EF4444"),
        category("research", "Research", "#84CC16"),
        category("temporary", "Temporary", "#F97316"),
        category("other", "Other", "#6B7280"),
    ]
}

fn default_category() -> String {
    "other".to_string()
}

fn default_color() -> String {
    "#3B82F6".to_string()
}

fn default_palette() -> Vec<String> {
    [
        "#3B82F6", "#10B981", "#F59E0B", "#8B5CF6", "#06B6D4", "#EF4444", "#84CC16", "#F97316",
        "#EC4899", "#6366F1", "#14B8A6", "#F43F5E",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

fn default_pdf_departments() -> Vec<String> {
    ["AIML", "CSE", "ECE", "EEE", "IT"]
        .iter()
        .map(|d| d.to_string())
        .collect()
}

fn default_user_departments() -> Vec<String> {
    [
        "CSE", "CSBS", "AIML", "CSDS", "IT", "CSCS", "ECE", "EIE", "IOT", "ECS", "EE", "CE", "FT",
        "ME", "BCA", "BBA", "BHM", "BMS",
    ]
    .iter()
    .map(|d| d.to_string())
    .collect()
}
