//! Configuration loading for fleetbom.
//!
//! A `.fleetbom.yaml` file tunes the few operational knobs the subsystem
//! exposes; everything has a sensible default and the CLI can override any
//! of it per invocation.
//!
//! ```yaml
//! alerts:
//!   threshold: 50.0
//! import:
//!   mode: skip_and_report
//! swap:
//!   return_location: Receiving
//! store:
//!   path: fleet.json
//! ```

use crate::alerts::DEFAULT_ALERT_THRESHOLD;
use crate::error::{FleetError, Result};
use crate::import::ImportMode;
use crate::swap::DEFAULT_RETURN_LOCATION;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[".fleetbom.yaml", ".fleetbom.yml", "fleetbom.yaml"];

/// Default fleet snapshot path used by the CLI.
pub const DEFAULT_STORE_PATH: &str = "fleet.json";

/// Alert evaluation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    /// Hours-remaining threshold below which a part alerts.
    pub threshold: f64,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ALERT_THRESHOLD,
        }
    }
}

/// Import behavior settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub mode: ImportMode,
}

/// Swap behavior settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapConfig {
    /// Warehouse location assigned to removed parts.
    pub return_location: String,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            return_location: DEFAULT_RETURN_LOCATION.to_string(),
        }
    }
}

/// Persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the JSON fleet snapshot.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub alerts: AlertsConfig,
    pub import: ImportConfig,
    pub swap: SwapConfig,
    pub store: StoreConfig,
}

impl AppConfig {
    /// Check every value for validity; called after any load or merge.
    pub fn validate(&self) -> Result<()> {
        if !self.alerts.threshold.is_finite() || self.alerts.threshold <= 0.0 {
            return Err(FleetError::Config(format!(
                "alerts.threshold must be a positive number, got {}",
                self.alerts.threshold
            )));
        }
        if self.swap.return_location.trim().is_empty() {
            return Err(FleetError::Config(
                "swap.return_location must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Discover a config file by searching standard locations.
///
/// Search order: explicit path, current directory, user config directory
/// (`~/.config/fleetbom/`), home directory.
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if let Some(path) = find_config_in_dir(&cwd) {
            return Some(path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join("fleetbom")) {
            return Some(path);
        }
    }

    if let Some(home) = dirs::home_dir() {
        if let Some(path) = find_config_in_dir(&home) {
            return Some(path);
        }
    }

    None
}

fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Load and validate a config file.
pub fn load_config_file(path: &Path) -> Result<AppConfig> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| FleetError::io(path, "failed to read config file", e))?;
    let config: AppConfig = serde_yaml::from_str(&data)
        .map_err(|e| FleetError::Config(format!("{}: {e}", path.display())))?;
    config.validate()?;
    Ok(config)
}

/// Load the discovered config, or fall back to defaults. Returns the path
/// the config was loaded from, if any.
pub fn load_or_default(explicit_path: Option<&Path>) -> Result<(AppConfig, Option<PathBuf>)> {
    match discover_config_file(explicit_path) {
        Some(path) => {
            let config = load_config_file(&path)?;
            tracing::debug!(path = %path.display(), "config loaded");
            Ok((config, Some(path)))
        }
        None => Ok((AppConfig::default(), None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        AppConfig::default().validate().unwrap();
    }

    #[test]
    fn yaml_round_trip_with_partial_file() {
        let config: AppConfig =
            serde_yaml::from_str("alerts:\n  threshold: 25\nimport:\n  mode: strict\n").unwrap();
        assert_eq!(config.alerts.threshold, 25.0);
        assert_eq!(config.import.mode, ImportMode::Strict);
        // Unspecified sections keep their defaults.
        assert_eq!(config.store.path, PathBuf::from(DEFAULT_STORE_PATH));
    }

    #[test]
    fn bad_threshold_is_rejected() {
        let mut config = AppConfig::default();
        config.alerts.threshold = -1.0;
        assert!(config.validate().is_err());
    }
}
