//! Step callback that updates the Observer API state.
//!
//! After each step, this callback publishes the new snapshot pair and
//! broadcasts a [`StepBroadcast`] to all connected `WebSocket` clients.

use std::sync::Arc;

use campus_core::runner::StepCallback;
use campus_observer::state::{AppState, StepBroadcast};
use campus_types::StepSnapshot;
use tracing::debug;

/// Callback that bridges the step loop to the Observer API.
pub struct ObserverCallback {
    state: Arc<AppState>,
}

impl ObserverCallback {
    /// Create a new observer callback backed by the given app state.
    pub const fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

impl StepCallback for ObserverCallback {
    fn on_step(&mut self, snapshot: &Arc<StepSnapshot>) {
        // Build the broadcast message.
        let broadcast = StepBroadcast {
            step: snapshot.step,
            time: snapshot.class_state.time.clone(),
            class: snapshot.class_state.class.clone(),
            class_status: snapshot.class_state.class_status,
            students_present: snapshot.class_state.students_present,
        };

        // Broadcast to WebSocket clients.
        let receivers = self.state.broadcast(&broadcast);
        debug!(step = snapshot.step, receivers, "Step broadcast sent");

        // Swap in the new snapshot pair. Readers holding the previous
        // Arc keep a consistent view of the step it came from; the
        // critical section on their side is a pointer clone, so this
        // never stalls the step loop.
        self.state.publish(Arc::clone(snapshot));
    }
}
