//! The repeating driver loop around [`run_step`].
//!
//! One dedicated task owns the simulation state and performs the step
//! loop: step, publish through the [`StepCallback`], sleep the configured
//! interval, repeat. Readers never interact with this loop -- they read
//! whatever snapshot was last published. The loop is unbounded in
//! production (`max_steps = 0`); tests and bounded runs set a limit.
//!
//! There is no catch-and-continue: a step error propagates out and the
//! process ends (crash-only).

use std::sync::Arc;

use campus_types::StepSnapshot;
use rand::Rng;
use tracing::info;

use crate::step::{self, SimulationState, StepError};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A step execution failed.
    #[error("step error: {source}")]
    Step {
        /// The underlying step error.
        #[from]
        source: StepError,
    },
}

/// Driver loop configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Real-time milliseconds to sleep between steps.
    pub step_interval_ms: u64,
    /// Stop after this many steps (0 = run forever).
    pub max_steps: u64,
}

/// Result of a bounded simulation run.
///
/// Only reachable when `max_steps > 0`; the unbounded production loop
/// never returns except on error.
#[derive(Debug)]
pub struct RunSummary {
    /// Total number of steps executed.
    pub total_steps: u64,
    /// The last published snapshot, if any step completed.
    pub final_snapshot: Option<Arc<StepSnapshot>>,
}

/// Callback invoked after each step completes.
///
/// Implementations publish the snapshot to the observer state, broadcast
/// step summaries, etc. The snapshot arrives pre-wrapped in an [`Arc`]
/// because publication is a pointer swap, never a copy.
pub trait StepCallback: Send {
    /// Called after a step completes successfully.
    fn on_step(&mut self, snapshot: &Arc<StepSnapshot>);
}

/// A no-op step callback for testing.
pub struct NoOpCallback;

impl StepCallback for NoOpCallback {
    fn on_step(&mut self, _snapshot: &Arc<StepSnapshot>) {}
}

/// Run the simulation loop until the step bound is reached.
///
/// This is the main entry point for the driver task. Each iteration runs
/// one step, hands the resulting snapshot to the callback, then sleeps
/// for the configured interval. With `max_steps = 0` the loop runs for
/// the lifetime of the process.
///
/// # Errors
///
/// Returns [`RunnerError`] if a step fails; the caller treats this as a
/// fatal process condition.
pub async fn run_simulation(
    state: &mut SimulationState,
    rng: &mut (impl Rng + Send),
    callback: &mut dyn StepCallback,
    config: &RunnerConfig,
) -> Result<RunSummary, RunnerError> {
    let mut last_snapshot: Option<Arc<StepSnapshot>> = None;
    let mut total_steps: u64 = 0;

    info!(
        max_steps = config.max_steps,
        step_interval_ms = config.step_interval_ms,
        "Simulation starting"
    );

    loop {
        // --- Execute step ---
        let snapshot = Arc::new(step::run_step(state, rng)?);
        total_steps = total_steps.saturating_add(1);

        // --- Publish ---
        callback.on_step(&snapshot);
        last_snapshot = Some(snapshot);

        // --- Check step limit ---
        if config.max_steps > 0 && total_steps >= config.max_steps {
            info!(total_steps, "Step limit reached");
            return Ok(RunSummary {
                total_steps,
                final_snapshot: last_snapshot,
            });
        }

        // --- Sleep for the step interval ---
        if config.step_interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(config.step_interval_ms)).await;
        }
    }
}
