//! Shared application state for the Observer API server.
//!
//! [`AppState`] holds the latest published [`StepSnapshot`] and the
//! broadcast channel for step summaries. The snapshot pair is one
//! immutable composite behind a single lock: publication is an `Arc`
//! swap, a read is an `Arc` clone. That single swap is what gives
//! readers the everything-from-step-N guarantee.

use std::sync::{Arc, PoisonError, RwLock};

use campus_types::{SessionStatus, StepSnapshot, Subject};
use tokio::sync::broadcast;

/// Capacity of the broadcast channel for step summaries.
///
/// If a subscriber falls behind by more than this many messages it will
/// receive a [`broadcast::error::RecvError::Lagged`] and skip to the
/// newest message.
const BROADCAST_CAPACITY: usize = 256;

/// JSON-serializable step summary pushed over the `WebSocket`.
///
/// A lightweight projection of the full snapshot for clients that only
/// track the step cadence.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StepBroadcast {
    /// The step number.
    pub step: u64,
    /// Label of the current time slot.
    pub time: String,
    /// The subject scheduled for the slot.
    pub class: Subject,
    /// Whether the session is being held.
    pub class_status: SessionStatus,
    /// Students present this step.
    pub students_present: u32,
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. Written
/// by exactly one task (the driver, through
/// [`publish`](AppState::publish)) and read by any number of request
/// handlers.
pub struct AppState {
    /// Broadcast sender for step summary messages.
    tx: broadcast::Sender<StepBroadcast>,
    /// The latest published snapshot. Swapped wholesale, never mutated.
    snapshot: RwLock<Arc<StepSnapshot>>,
}

impl AppState {
    /// Create the application state seeded with the first snapshot.
    ///
    /// The engine runs one bootstrap step before the server starts, so
    /// readers never observe an empty or zero-filled state.
    pub fn new(initial: StepSnapshot) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            tx,
            snapshot: RwLock::new(Arc::new(initial)),
        }
    }

    /// Publish a new snapshot, replacing the previous one atomically.
    ///
    /// Called once per step by the driver. The write lock is held only
    /// for the pointer swap; readers holding the old `Arc` keep a fully
    /// consistent view of the step it came from.
    pub fn publish(&self, snapshot: Arc<StepSnapshot>) {
        let mut guard = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = snapshot;
    }

    /// Return the latest published snapshot.
    ///
    /// Non-blocking in practice: the critical section is an `Arc` clone.
    pub fn latest(&self) -> Arc<StepSnapshot> {
        Arc::clone(
            &self
                .snapshot
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Subscribe to the step broadcast channel.
    ///
    /// Returns a receiver that will yield a [`StepBroadcast`] for every
    /// step the driver publishes.
    pub fn subscribe(&self) -> broadcast::Receiver<StepBroadcast> {
        self.tx.subscribe()
    }

    /// Publish a step summary to all connected clients.
    ///
    /// Returns the number of receivers that received the message.
    /// Returns 0 if no clients are connected (this is not an error).
    pub fn broadcast(&self, summary: &StepBroadcast) -> usize {
        // send returns Err only when there are zero receivers, which is
        // normal when no WebSocket clients are connected.
        self.tx.send(summary.clone()).unwrap_or(0)
    }
}
