//! Program settings.
//!
//! An optional `binroute.toml` in the working directory tunes logging and
//! the route planner:
//!
//! ```toml
//! [global]
//! log_level = "debug"
//!
//! [planner]
//! critical_threshold_days = 2
//! urgency_weight = 1000.0
//! ```
//!
//! Every key is optional; missing keys (or a missing file) fall back to the
//! defaults above.

use crate::planner::DEFAULT_URGENCY_WEIGHT;
use crate::predictor::DEFAULT_CRITICAL_THRESHOLD;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Name of the optional settings file.
pub const SETTINGS_FILE_NAME: &str = "binroute.toml";

/// Program settings, fully resolved against defaults.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Logging and other program-wide options.
    pub global: GlobalSettings,
    /// Route-planner tuning.
    pub planner: PlannerSettings,
}

/// The `[global]` section.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlobalSettings {
    /// Preferred log level; the `BINROUTE_LOG_LEVEL` environment variable
    /// takes precedence.
    pub log_level: Option<String>,
}

/// The `[planner]` section.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlannerSettings {
    /// Days-to-overflow at or under which a bin counts as critical.
    pub critical_threshold_days: u32,
    /// Weight of the urgency component in the bin-selection score. Urgency
    /// dominates distance only while distances stay below this value, so
    /// deployments with longer roads should raise it.
    pub urgency_weight: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            global: GlobalSettings::default(),
            planner: PlannerSettings::default(),
        }
    }
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self { log_level: None }
    }
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            critical_threshold_days: DEFAULT_CRITICAL_THRESHOLD,
            urgency_weight: DEFAULT_URGENCY_WEIGHT,
        }
    }
}

impl Settings {
    /// Load settings from [`SETTINGS_FILE_NAME`] in the working directory,
    /// or defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        Self::from_path(Path::new(SETTINGS_FILE_NAME))
    }

    /// Load settings from `path`, or defaults when it does not exist.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("Error reading {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Error parsing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::from_path(&dir.path().join(SETTINGS_FILE_NAME)).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.planner.critical_threshold_days, 2);
        assert_eq!(settings.planner.urgency_weight, 1000.0);
        assert_eq!(settings.global.log_level, None);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "[planner]\nurgency_weight = 2500.0").unwrap();
        }

        let settings = Settings::from_path(&path).unwrap();
        assert_eq!(settings.planner.urgency_weight, 2500.0);
        assert_eq!(settings.planner.critical_threshold_days, 2);
        assert_eq!(settings.global.log_level, None);
    }

    #[test]
    fn test_full_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        {
            let mut file = File::create(&path).unwrap();
            writeln!(
                file,
                "[global]\nlog_level = \"debug\"\n\n[planner]\ncritical_threshold_days = 4\nurgency_weight = 100.0"
            )
            .unwrap();
        }

        let settings = Settings::from_path(&path).unwrap();
        assert_eq!(settings.global.log_level.as_deref(), Some("debug"));
        assert_eq!(settings.planner.critical_threshold_days, 4);
        assert_eq!(settings.planner.urgency_weight, 100.0);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "not valid toml [").unwrap();
        }
        assert!(Settings::from_path(&path).is_err());
    }
}
