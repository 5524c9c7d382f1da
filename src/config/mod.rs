//! Configuration management
//!
//! This module handles parsing and validation of the agent's TOML
//! configuration. All fields carry defaults; a missing configuration file
//! means "run with defaults", matching the desktop application's behavior.

mod validation;

use crate::error::{AgentError, Result};
use crate::wake::WakeBackendKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Remote-control service settings
    #[serde(default)]
    pub control: ControlConfig,

    /// Suspend/resume monitor settings
    #[serde(default)]
    pub wake: WakeConfig,
}

/// Configuration for the exported control service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Export the remote-control service on the session bus
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Well-known bus name to request (overridable for test buses)
    #[serde(default = "default_well_known_name")]
    pub well_known_name: String,
}

/// Configuration for the wake monitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WakeConfig {
    /// Enable suspend/resume monitoring
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Candidate backends in priority order (first successful attach wins)
    #[serde(default = "default_backends")]
    pub backends: Vec<WakeBackendKind>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            AgentError::Config(format!(
                "Failed to read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_bus_name(&self.control.well_known_name)?;
        validation::validate_backends(&self.wake.backends)?;
        Ok(())
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            well_known_name: default_well_known_name(),
        }
    }
}

impl Default for WakeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backends: default_backends(),
        }
    }
}

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_well_known_name() -> String {
    crate::bus::WELL_KNOWN_NAME.to_string()
}

fn default_backends() -> Vec<WakeBackendKind> {
    vec![WakeBackendKind::Logind, WakeBackendKind::ConsoleKit]
}
