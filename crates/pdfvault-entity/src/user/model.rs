//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::UserRole;

/// A registered repository user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role.
    pub role: UserRole,
    /// Department (clients only).
    #[serde(default)]
    pub department: Option<String>,
    /// Study year (clients only).
    #[serde(default)]
    pub year: Option<u8>,
    /// Semester (clients only).
    #[serde(default)]
    pub semester: Option<u8>,
    /// Whether the account is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Access tags granted to this user.
    #[serde(default)]
    pub access_tags: Vec<String>,
    /// Last successful login.
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    /// When the account was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Editable user fields; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    /// New role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    /// Activation flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New department.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// New study year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u8>,
    /// New semester.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<u8>,
    /// Replacement access-tag list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_tags: Option<Vec<String>>,
}

/// Filters of the user list screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserFilter {
    /// Name or email search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Role filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

fn default_true() -> bool {
    true
}
