//! Stub backend for service tests.

use axum::Router;
use tokio::net::TcpListener;

use pdfvault_client::{ApiClient, ClientContext, Session};
use pdfvault_core::config::ApiConfig;

/// Serve `router` on an ephemeral port and return a client for it.
pub(crate) async fn stub_client(router: Router) -> ApiClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    let config = ApiConfig {
        base_url: format!("http://{addr}/api"),
        timeout_seconds: 5,
        ..Default::default()
    };
    ApiClient::new(ClientContext::new(&config, Session::in_memory()).unwrap())
}
