//! Inbound HTTP surface.

mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::Result;
use crate::error::Error;
use crate::gchat::GChatClient;
use crate::metrics::Metrics;
use crate::types::Provider;

/// Shared by all requests; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub provider: Provider,
    pub client: GChatClient,
    pub metrics: Arc<Metrics>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/alerts", post(handlers::alert))
        .route("/metrics", get(handlers::metrics))
        .route("/healthz", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `state` on `addr` until `shutdown` resolves.
///
/// # Errors
///
/// Returns [`Error::Server`] when the address cannot be bound or the
/// listener fails.
pub async fn serve(
    addr: SocketAddr,
    state: AppState,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| Error::Server { source })?;
    info!(%addr, provider = %state.provider, "Listening for alerts");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|source| Error::Server { source })
}
