//! Observer API server for the campus simulation.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **REST endpoints** for the current-state view, per-student
//!   attendance, and the aggregate dashboard
//! - **A keyword query endpoint** (`POST /admin/chat`) that answers a
//!   small fixed set of phrases from the latest snapshot
//! - **A `WebSocket` endpoint** (`/ws/steps`) streaming step summaries
//!   via [`tokio::sync::broadcast`]
//! - **A minimal HTML status page** (`GET /`)
//!
//! # Architecture
//!
//! The observer reads from the latest published [`StepSnapshot`]
//! (`campus_types::StepSnapshot`). The driver replaces one
//! `Arc<StepSnapshot>` with the next under a short write lock; readers
//! clone the `Arc` out under the read lock. Because the current-state
//! view and the attendance table live inside one immutable composite, a
//! request always observes a single step's data -- never a torn mix of
//! two steps. Readers never block the step loop and the loop never waits
//! for readers.

pub mod chat;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use startup::{StartupError, spawn_observer};
pub use state::{AppState, StepBroadcast};
