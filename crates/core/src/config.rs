//! Configuration management for PilotOps.
//!
//! Every key is optional; a missing section falls back to the defaults
//! below, which match the file names the operations desk has always used.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
#[cfg(feature = "config-file")]
use std::path::Path;

use crate::error::{CoreError, Result};

const DEFAULT_SCHEDULE_FILE: &str = "pilot_data.csv";
const DEFAULT_LATE_CHECKIN_FILE: &str = "late_checkin.csv";
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub files: FilesConfig,
    pub logging: LoggingConfig,
    pub schedule: ScheduleConfig,
}

/// Locations of the schedule source and the late check-in audit trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub schedule: PathBuf,
    pub late_checkins: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            schedule: PathBuf::from(DEFAULT_SCHEDULE_FILE),
            late_checkins: PathBuf::from(DEFAULT_LATE_CHECKIN_FILE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub malformed_records: MalformedRecordPolicy,
}

/// What the schedule loader does with a row it cannot parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedRecordPolicy {
    /// Leave the row out and fail lookups for its pilot id
    #[default]
    Skip,
    /// Abort the whole load on the first bad row
    Halt,
}

impl Config {
    #[cfg(feature = "config-file")]
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content).map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Rejected configuration file");
            e
        })?;
        tracing::debug!(
            path = %path.display(),
            schedule = %config.files.schedule.display(),
            late_checkins = %config.files.late_checkins.display(),
            "Configuration loaded"
        );
        Ok(config)
    }

    #[cfg(feature = "config-file")]
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| CoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.files.schedule.as_os_str().is_empty() {
            return Err(CoreError::Config("files.schedule must not be empty".into()));
        }
        if self.files.late_checkins.as_os_str().is_empty() {
            return Err(CoreError::Config(
                "files.late_checkins must not be empty".into(),
            ));
        }
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(CoreError::Config(format!(
                "unknown logging.level '{}'",
                self.logging.level
            )));
        }
        Ok(())
    }
}
