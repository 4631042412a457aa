//! Axum router construction for the Observer API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::chat;
use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the Observer server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /ws/steps` -- `WebSocket` step summary stream
/// - `GET /student/status` -- current-state view
/// - `GET /student/attendance/:id` -- one student's attendance
/// - `GET /admin/dashboard` -- aggregate dashboard
/// - `POST /admin/chat` -- keyword queries
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws/steps", get(ws::ws_steps))
        // REST API
        .route("/student/status", get(handlers::get_status))
        .route("/student/attendance/{id}", get(handlers::get_attendance))
        .route("/admin/dashboard", get(handlers::get_dashboard))
        .route("/admin/chat", post(chat::chat))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
