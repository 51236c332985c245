use std::net::SocketAddr;

use axum::{Extension, Router, routing::get};

use crate::{api, spotify::auth::SharedLogin};

/// Serves the login callback on `/` and a health probe on `/health` until the
/// task is dropped.
pub async fn start_api_server(addr: SocketAddr, state: SharedLogin) -> std::io::Result<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/", get(api::callback).layer(Extension(state)));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::debug!(%addr, "callback server listening");
    axum::serve(listener, app).await
}
