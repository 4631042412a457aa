//! Observer server startup helper for embedding in the engine binary.
//!
//! Provides [`spawn_observer`] which launches the Observer HTTP +
//! `WebSocket` server on a background Tokio task. The engine calls this
//! during startup so the Observer API runs concurrently with the step
//! loop.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::server::{ServerConfig, ServerError};
use crate::state::AppState;

/// Errors that can occur when spawning the Observer server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Spawn the Observer HTTP server on a background Tokio task.
///
/// Binds to `{host}:{port}` and serves the REST API plus the `WebSocket`
/// endpoint for real-time step streaming. Returns a [`JoinHandle`] so
/// the caller can manage the server's lifecycle alongside the step loop.
///
/// The server runs until the Tokio runtime is shut down or the task is
/// aborted.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the configured address does not
/// parse. A bind failure inside the background task is logged rather
/// than returned.
pub async fn spawn_observer(
    config: ServerConfig,
    state: Arc<AppState>,
) -> Result<JoinHandle<()>, StartupError> {
    // Verify the address is parseable before spawning the background
    // task. The actual bind happens inside start_server, but we catch
    // obvious misconfigurations early.
    let addr_str = format!("{}:{}", config.host, config.port);
    let _: std::net::SocketAddr = addr_str.parse().map_err(|e| {
        StartupError::Server(ServerError::Bind(format!("invalid address {addr_str}: {e}")))
    })?;

    let port = config.port;
    let handle = tokio::spawn(async move {
        if let Err(e) = crate::server::start_server(&config, state).await {
            tracing::error!(error = %e, "Observer server exited with error");
        }
    });

    tracing::info!(port, "Observer server spawned on background task");

    Ok(handle)
}
