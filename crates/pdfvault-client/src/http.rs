//! JSON request plumbing with bearer auth and uniform error mapping.

use std::sync::Arc;

use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use pdfvault_core::error::{AppError, ErrorKind};
use pdfvault_core::AppResult;

use crate::context::ClientContext;
use crate::dto::ErrorBody;

/// Query string builder that skips unset values.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    /// Start an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn push(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a parameter when it is set and not blank.
    pub fn push_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value.map(|v| v.to_string()).filter(|v| !v.trim().is_empty()) {
            Some(v) => self.push(key, v),
            None => self,
        }
    }

    /// Whether no parameter was added.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Client for the backend's JSON API.
///
/// Cheap to clone; every clone shares one [`ClientContext`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    ctx: Arc<ClientContext>,
}

impl ApiClient {
    /// Wrap a context.
    pub fn new(ctx: ClientContext) -> Self {
        Self { ctx: Arc::new(ctx) }
    }

    /// Share an existing context.
    pub fn from_shared(ctx: Arc<ClientContext>) -> Self {
        Self { ctx }
    }

    /// The shared context.
    pub fn context(&self) -> &ClientContext {
        &self.ctx
    }

    /// `GET` a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.execute::<T, ()>(Method::GET, path, &Query::new(), None)
            .await
    }

    /// `GET` a JSON resource with query parameters.
    pub async fn get_with<T: DeserializeOwned>(&self, path: &str, query: &Query) -> AppResult<T> {
        self.execute::<T, ()>(Method::GET, path, query, None).await
    }

    /// `POST` a JSON body.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(Method::POST, path, &Query::new(), Some(body))
            .await
    }

    /// `PUT` a JSON body.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(Method::PUT, path, &Query::new(), Some(body))
            .await
    }

    /// `DELETE` a resource.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.execute::<T, ()>(Method::DELETE, path, &Query::new(), None)
            .await
    }

    async fn execute<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<&B>,
    ) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut url = Url::parse(&self.ctx.url(path))
            .map_err(|e| AppError::configuration(format!("Invalid API URL for '{path}': {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        let mut request = self.ctx.http().request(method.clone(), url);
        if let Some(token) = self.ctx.session().token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(method = %method, path = %path, "API request");

        let response = request.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("{method} {path} failed: {e}"),
                e,
            )
        })?;

        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("{method} {path} returned an unexpected body: {e}"),
                    e,
                )
            });
        }

        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });

        warn!(method = %method, path = %path, status = status.as_u16(), error = %detail, "API request failed");

        Err(self.map_status(status, detail)?)
    }

    /// Map a failed status to an error, dropping the session on 401.
    fn map_status(&self, status: StatusCode, detail: String) -> AppResult<AppError> {
        let err = match status {
            StatusCode::UNAUTHORIZED => {
                self.ctx.session().clear()?;
                AppError::authentication(format!("Session expired or invalid: {detail}"))
            }
            StatusCode::FORBIDDEN => AppError::authorization(detail),
            StatusCode::NOT_FOUND => AppError::not_found(detail),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                AppError::validation(detail)
            }
            StatusCode::CONFLICT => AppError::conflict(detail),
            StatusCode::SERVICE_UNAVAILABLE => AppError::service_unavailable(detail),
            _ => AppError::external_service(format!("Backend error {}: {detail}", status.as_u16())),
        };
        Ok(err)
    }
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use axum::Router;
    use axum::extract::RawQuery;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use serde_json::{Value, json};

    use super::*;
    use crate::testing::{client_for, spawn_stub};

    #[tokio::test]
    async fn test_bearer_token_and_query_are_sent() {
        let router = Router::new().route(
            "/api/echo",
            get(|headers: HeaderMap, RawQuery(query): RawQuery| async move {
                Json(json!({
                    "auth": headers.get("authorization").and_then(|v| v.to_str().ok()),
                    "query": query,
                }))
            }),
        );
        let base = spawn_stub(router).await;
        let client = client_for(&base);
        client.context().session().store("tok-1").unwrap();

        let query = Query::new()
            .push("page", 2)
            .push_opt("search", Some("os notes"))
            .push_opt::<&str>("role", None)
            .push_opt("department", Some("  "));
        let body: Value = client.get_with("/echo", &query).await.unwrap();

        assert_eq!(body["auth"], "Bearer tok-1");
        assert_eq!(body["query"], "page=2&search=os+notes");
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session() {
        let router = Router::new().route(
            "/api/admin/users",
            get(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"error": "Invalid token"})),
                )
            }),
        );
        let base = spawn_stub(router).await;
        let client = client_for(&base);
        client.context().session().store("stale").unwrap();

        let err = client.get::<Value>("/admin/users").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert!(err.message.contains("Invalid token"));
        assert!(!client.context().session().is_authenticated());
    }

    #[tokio::test]
    async fn test_backend_message_is_surfaced() {
        let router = Router::new()
            .route(
                "/api/boom",
                get(|| async {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({"error": "Failed to fetch Google Drive folders", "details": "quota"})),
                    )
                }),
            )
            .route(
                "/api/missing",
                get(|| async { (StatusCode::NOT_FOUND, Json(json!({"error": "User not found"}))) }),
            );
        let base = spawn_stub(router).await;
        let client = client_for(&base);

        let err = client.get::<Value>("/boom").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
        assert!(err.message.contains("Failed to fetch Google Drive folders"));

        let err = client.get::<Value>("/missing").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "User not found");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_external_failure() {
        let client = client_for("http://127.0.0.1:9");
        let err = client.get::<Value>("/folders").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
    }
}
