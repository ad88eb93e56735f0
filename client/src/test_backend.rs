//! In-process fake backend for tests.
//!
//! Tests build an `axum::Router` with just the routes they exercise and get
//! back a client pointed at it.

use axum::Router;
use tokio::net::TcpListener;

use crate::{ApiClient, ClientConfig};

/// Serve `router` on an ephemeral local port and return its base URL.
pub(crate) async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind fake backend");
    let addr = listener.local_addr().expect("fake backend addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("fake backend");
    });
    format!("http://{addr}")
}

/// Serve `router` and return a client for it.
pub(crate) async fn client_for(router: Router) -> ApiClient {
    let base = serve(router).await;
    ApiClient::new(&ClientConfig::default().with_base_url(&base)).expect("client for fake backend")
}
