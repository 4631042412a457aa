//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `campus-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure and provides a loader that reads the file. Every
//! field has a default matching the reference institution, so the binary
//! also runs with no file at all.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `campus-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CampusConfig {
    /// Institution-level settings (name, seed, step cadence).
    #[serde(default)]
    pub campus: InstitutionConfig,

    /// Daily schedule: time slots and the subject table.
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Roster parameters.
    #[serde(default)]
    pub roster: RosterConfig,

    /// Simulation boundary parameters.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Observer server settings.
    #[serde(default)]
    pub observer: ObserverConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CampusConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The `CAMPUS_OBSERVER_PORT` environment variable overrides
    /// `observer.port` so deployments can remap the port without editing
    /// the file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.observer.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.observer.apply_env_overrides();
        Ok(config)
    }
}

/// Institution-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstitutionConfig {
    /// Human-readable institution name.
    #[serde(default = "default_campus_name")]
    pub name: String,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Real-time milliseconds between steps.
    #[serde(default = "default_step_interval_ms")]
    pub step_interval_ms: u64,
}

impl Default for InstitutionConfig {
    fn default() -> Self {
        Self {
            name: default_campus_name(),
            seed: default_seed(),
            step_interval_ms: default_step_interval_ms(),
        }
    }
}

/// One row of the subject table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubjectSpec {
    /// Catalog name of the subject.
    pub name: String,

    /// Room the subject's sessions are assigned to.
    pub room: String,

    /// Display name of the teacher bound to the subject.
    pub teacher: String,
}

/// Daily schedule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduleConfig {
    /// Ordered time-slot labels forming the daily cycle.
    #[serde(default = "default_time_slots")]
    pub time_slots: Vec<String>,

    /// Ordered subject rotation with room and teacher lookups.
    #[serde(default = "default_subjects")]
    pub subjects: Vec<SubjectSpec>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            time_slots: default_time_slots(),
            subjects: default_subjects(),
        }
    }
}

/// Roster configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RosterConfig {
    /// Number of students enrolled at simulation start.
    #[serde(default = "default_student_count")]
    pub students: u32,

    /// Prefix for roster ids (`S` -> `S01`, `S02`, ...).
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            students: default_student_count(),
            id_prefix: default_id_prefix(),
        }
    }
}

/// Simulation boundary configuration.
///
/// `max_steps = 0` means unbounded, the production default: the driver
/// loop runs for the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Maximum number of steps before the loop stops (0 = unlimited).
    #[serde(default)]
    pub max_steps: u64,
}

/// Observer server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObserverConfig {
    /// The host address to bind to.
    #[serde(default = "default_observer_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_observer_port")]
    pub port: u16,
}

impl ObserverConfig {
    /// Override the port with `CAMPUS_OBSERVER_PORT` when set and valid.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("CAMPUS_OBSERVER_PORT")
            && let Ok(port) = val.parse::<u16>()
        {
            self.port = port;
        }
    }
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            host: default_observer_host(),
            port: default_observer_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_campus_name() -> String {
    "Smart College".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_step_interval_ms() -> u64 {
    5_000
}

fn default_time_slots() -> Vec<String> {
    vec![
        "09:00-10:00".to_owned(),
        "10:00-11:00".to_owned(),
        "11:00-12:00".to_owned(),
    ]
}

fn default_subjects() -> Vec<SubjectSpec> {
    vec![
        SubjectSpec {
            name: "CSE-2A".to_owned(),
            room: "Block A - 101".to_owned(),
            teacher: "Prof. Smith".to_owned(),
        },
        SubjectSpec {
            name: "DBMS".to_owned(),
            room: "Block B - 204".to_owned(),
            teacher: "Dr. Rao".to_owned(),
        },
    ]
}

const fn default_student_count() -> u32 {
    30
}

fn default_id_prefix() -> String {
    "S".to_owned()
}

fn default_observer_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_observer_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_the_reference_institution() {
        let config = CampusConfig::default();
        assert_eq!(config.campus.seed, 42);
        assert_eq!(config.campus.step_interval_ms, 5_000);
        assert_eq!(config.schedule.time_slots.len(), 3);
        assert_eq!(config.schedule.subjects.len(), 2);
        assert_eq!(config.roster.students, 30);
        assert_eq!(config.simulation.max_steps, 0);
        assert_eq!(config.observer.port, 8000);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
campus:
  name: "Test College"
  seed: 123
  step_interval_ms: 1000

schedule:
  time_slots:
    - "08:00-09:00"
    - "09:00-10:00"
  subjects:
    - name: "PHYS"
      room: "Lab 3"
      teacher: "Dr. Wu"

roster:
  students: 5
  id_prefix: "T"

simulation:
  max_steps: 50

observer:
  host: "127.0.0.1"
  port: 9090

logging:
  level: "debug"
"#;

        let config = CampusConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_else(CampusConfig::default);

        assert_eq!(config.campus.name, "Test College");
        assert_eq!(config.campus.seed, 123);
        assert_eq!(config.schedule.time_slots.len(), 2);
        assert_eq!(
            config.schedule.subjects.first().map(|s| s.room.as_str()),
            Some("Lab 3")
        );
        assert_eq!(config.roster.students, 5);
        assert_eq!(config.roster.id_prefix, "T");
        assert_eq!(config.simulation.max_steps, 50);
        assert_eq!(config.observer.host, "127.0.0.1");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "campus:\n  seed: 7\n";
        let config = CampusConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_else(CampusConfig::default);

        // Seed is overridden
        assert_eq!(config.campus.seed, 7);
        // Everything else uses defaults
        assert_eq!(config.roster.students, 30);
        assert_eq!(config.schedule.subjects.len(), 2);
    }

    #[test]
    fn parse_empty_yaml() {
        let yaml = "";
        let config = CampusConfig::parse(yaml);
        assert!(config.is_ok());
    }
}
