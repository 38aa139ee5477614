//! HTTP surface for Lookout: the webhook route, a health probe, and the
//! error-to-status mapping.

pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use lookout_review::handler::ReviewHandler;
use tokio::net::TcpListener;

/// Shared state for the HTTP handlers.
///
/// Cloned per request; everything inside is an immutable `Arc` handle, so
/// concurrent deliveries share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    /// The orchestrator invoked for every webhook delivery.
    pub handler: Arc<ReviewHandler>,
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    routes::router(state)
}

/// Bind `addr` and serve until ctrl-c.
///
/// # Errors
///
/// Returns the bind or accept error from the listener.
pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutting down");
}
