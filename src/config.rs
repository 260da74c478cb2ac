/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Run configuration

use crate::projector::ProjectorMode;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

/// PAW reconstruction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PawConfig {
    /// Plane-wave cutoff (eV) for the momentum G grid
    pub encut: f64,
    /// Number of |G| samples per density transform
    pub transform_points: usize,
    /// Headroom on the sampled |G| range
    pub transform_margin: f64,
    /// Radial family evaluated by projector sites
    pub projector_mode: ProjectorMode,
}

impl Default for PawConfig {
    fn default() -> Self {
        Self {
            encut: 520.0,
            transform_points: 200,
            transform_margin: 1.5,
            projector_mode: ProjectorMode::Projector,
        }
    }
}

impl PawConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings the numerical kernels cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(self.encut > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "encut must be positive, got {}",
                self.encut
            )));
        }
        if self.transform_points < 3 {
            return Err(ConfigError::Invalid(format!(
                "transform_points must be at least 3, got {}",
                self.transform_points
            )));
        }
        if !(self.transform_margin >= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "transform_margin must be at least 1, got {}",
                self.transform_margin
            )));
        }
        Ok(())
    }
}
