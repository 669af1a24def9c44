//! Admin login models.

use serde::{Deserialize, Serialize};

/// Credentials for `POST /auth/admin-login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Admin username.
    pub username: String,
    /// Admin password.
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The logged-in administrator.
    pub user: AdminUser,
}

/// The administrator behind the current session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    /// Identifier (`"admin"` for the environment-configured admin).
    pub id: String,
    /// Login name.
    #[serde(default)]
    pub username: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Role string as reported by the backend.
    pub role: String,
    /// Whether this admin is configured through the backend environment.
    #[serde(default)]
    pub is_env_admin: bool,
}
