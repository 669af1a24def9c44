//! Admin login, logout and identity.

use serde_json::json;
use tracing::info;

use pdfvault_core::AppResult;
use pdfvault_entity::auth::{AdminUser, LoginRequest, LoginResponse};

use crate::dto::{MeResponse, MessageResponse};
use crate::http::ApiClient;

/// `/auth` endpoints.
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    /// Create the endpoint group.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Log in and store the returned token in the session.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<AdminUser> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.client.post("/auth/admin-login", &request).await?;
        self.client.context().session().store(response.token)?;
        info!(admin = %response.user.id, "Admin logged in");
        Ok(response.user)
    }

    /// Log out. The local session is cleared even if the backend call fails.
    pub async fn logout(&self) -> AppResult<()> {
        let result = self
            .client
            .post::<MessageResponse, _>("/auth/admin-logout", &json!({}))
            .await;
        self.client.context().session().clear()?;
        result.map(|_| ())
    }

    /// The administrator behind the current token.
    pub async fn me(&self) -> AppResult<AdminUser> {
        let response: MeResponse = self.client.get("/auth/admin/me").await?;
        Ok(response.user)
    }
}

#[cfg(test)]
mod tests {
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use super::*;
    use crate::testing::{client_for, spawn_stub};

    #[tokio::test]
    async fn test_login_stores_token_and_logout_clears_it() {
        let router = Router::new()
            .route(
                "/api/auth/admin-login",
                post(|Json(body): Json<Value>| async move {
                    assert_eq!(body["username"], "admin");
                    Json(json!({
                        "token": "jwt-abc",
                        "user": {"id": "admin", "username": "admin", "role": "admin", "isEnvAdmin": true}
                    }))
                }),
            )
            .route(
                "/api/auth/admin-logout",
                post(|| async { Json(json!({"message": "Logged out"})) }),
            )
            .route(
                "/api/auth/admin/me",
                get(|| async { Json(json!({"user": {"id": "admin", "role": "admin"}})) }),
            );
        let base = spawn_stub(router).await;
        let client = client_for(&base);
        let auth = AuthApi::new(client.clone());

        let user = auth.login("admin", "secret").await.unwrap();
        assert!(user.is_env_admin);
        assert_eq!(client.context().session().token().as_deref(), Some("jwt-abc"));

        assert_eq!(auth.me().await.unwrap().role, "admin");

        auth.logout().await.unwrap();
        assert!(!client.context().session().is_authenticated());
    }
}
