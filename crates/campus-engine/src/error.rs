//! Error types for the engine binary.

/// Errors that can occur while wiring up or running the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration could not be loaded.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: campus_core::config::ConfigError,
    },

    /// The schedule configuration is invalid.
    #[error("schedule error: {source}")]
    Schedule {
        /// The underlying clock error.
        #[from]
        source: campus_core::clock::ClockError,
    },

    /// The bootstrap step failed before the server started.
    #[error("bootstrap step error: {source}")]
    Bootstrap {
        /// The underlying step error.
        #[from]
        source: campus_core::step::StepError,
    },

    /// The simulation loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: campus_core::runner::RunnerError,
    },

    /// The observer server failed to start.
    #[error("observer error: {message}")]
    Observer {
        /// Description of the startup failure.
        message: String,
    },
}
