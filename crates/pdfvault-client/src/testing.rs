//! Stub backend for client tests.

use axum::Router;
use tokio::net::TcpListener;

use pdfvault_core::config::ApiConfig;

use crate::context::ClientContext;
use crate::http::ApiClient;
use crate::session::Session;

/// Serve `router` on an ephemeral port and return its base URL.
pub(crate) async fn spawn_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A client for the stub at `base`, with an in-memory session.
pub(crate) fn client_for(base: &str) -> ApiClient {
    let config = ApiConfig {
        base_url: format!("{base}/api"),
        timeout_seconds: 5,
        ..Default::default()
    };
    ApiClient::new(ClientContext::new(&config, Session::in_memory()).unwrap())
}
