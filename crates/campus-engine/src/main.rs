//! Campus simulation binary.
//!
//! This is the main entry point that wires together the schedule clock,
//! the teacher and student agents, the observer server, and the step
//! loop. It loads configuration, runs one bootstrap step so the first
//! published snapshot is real data, starts the observer, and drives the
//! simulation until a termination condition is met.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `campus-config.yaml` (built-in defaults
//!    when the file is absent)
//! 2. Initialize structured logging (tracing)
//! 3. Build the simulation state (clock, teachers, rooms, roster)
//! 4. Seed the random generator from the configured seed
//! 5. Run the bootstrap step and create the observer state from it
//! 6. Start the Observer API server on a background task
//! 7. Run the step loop (unbounded unless `simulation.max_steps` is set)
//!
//! A step failure is fatal: the process exits with an error rather than
//! attempting partial-step recovery.

mod callback;
mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use campus_core::config::CampusConfig;
use campus_core::runner::{self, RunnerConfig};
use campus_core::step::{self, SimulationState};
use campus_observer::server::ServerConfig;
use campus_observer::state::AppState;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::callback::ObserverCallback;
use crate::error::EngineError;

/// Environment variable naming an alternate configuration file.
const CONFIG_PATH_ENV: &str = "CAMPUS_CONFIG";

/// Default configuration file name, resolved against the working
/// directory.
const CONFIG_FILE: &str = "campus-config.yaml";

/// Application entry point for the campus engine.
///
/// Initializes all subsystems and runs the step loop.
///
/// # Errors
///
/// Returns an error if any initialization step or the simulation itself
/// fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration before logging so the configured level can
    //    seed the filter (RUST_LOG still wins).
    let config_path = config_path();
    let (config, from_file) = load_config(&config_path)?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("campus-engine starting");
    if from_file {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!(path = %config_path.display(), "No config file found, using defaults");
    }
    info!(
        campus = config.campus.name,
        seed = config.campus.seed,
        step_interval_ms = config.campus.step_interval_ms,
        students = config.roster.students,
        subjects = config.schedule.subjects.len(),
        "Configuration resolved"
    );

    // 3. Build the simulation state.
    let mut state = SimulationState::from_config(&config).map_err(EngineError::from)?;
    info!(
        time_slots = config.schedule.time_slots.len(),
        "Simulation state initialized"
    );

    // 4. Seed the random generator. Owned and injected explicitly so a
    //    fixed seed reproduces the whole snapshot sequence.
    let mut rng = SmallRng::seed_from_u64(config.campus.seed);

    // 5. Bootstrap step: the first published snapshot is real step data,
    //    so readers never observe an empty state.
    let bootstrap = step::run_step(&mut state, &mut rng).map_err(EngineError::from)?;
    info!(step = bootstrap.step, "Bootstrap step completed");
    let app_state = Arc::new(AppState::new(bootstrap));

    // 6. Start the Observer API server.
    let server_config = ServerConfig {
        host: config.observer.host.clone(),
        port: config.observer.port,
    };
    let observer_port = server_config.port;
    let _observer_handle =
        campus_observer::spawn_observer(server_config, Arc::clone(&app_state))
            .await
            .map_err(|e| EngineError::Observer {
                message: format!("{e}"),
            })?;
    info!(port = observer_port, "Observer API server started");

    // 7. Run the step loop. Unbounded in production; any step error is
    //    fatal and surfaces here.
    let runner_config = RunnerConfig {
        step_interval_ms: config.campus.step_interval_ms,
        max_steps: config.simulation.max_steps,
    };
    let mut observer_callback = ObserverCallback::new(Arc::clone(&app_state));

    let summary =
        runner::run_simulation(&mut state, &mut rng, &mut observer_callback, &runner_config)
            .await
            .map_err(EngineError::from)?;

    // Only reachable for bounded runs.
    info!(
        total_steps = summary.total_steps,
        final_step = summary.final_snapshot.as_ref().map(|s| s.step),
        "Simulation ended"
    );

    Ok(())
}

/// Resolve the configuration file path from the environment.
fn config_path() -> PathBuf {
    std::env::var(CONFIG_PATH_ENV).map_or_else(|_| PathBuf::from(CONFIG_FILE), PathBuf::from)
}

/// Load configuration from the given path, falling back to defaults when
/// the file does not exist. Returns the config and whether it came from
/// a file.
fn load_config(path: &Path) -> Result<(CampusConfig, bool), EngineError> {
    if path.exists() {
        let config = CampusConfig::from_file(path)?;
        Ok((config, true))
    } else {
        Ok((CampusConfig::default(), false))
    }
}
