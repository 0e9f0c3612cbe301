//! Session configuration. Values come from an optional JSON file; anything
//! missing falls back to defaults, anything malformed or unusable fails
//! closed before the engine is built.

use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Default per-tick occupancy rate.
pub const DEFAULT_RATE_PER_TICK: f64 = 1.0;

/// Default number of zones registered at startup.
pub const DEFAULT_INITIAL_ZONES: u32 = 0;

/// Tunables for one interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Zones registered before the first command runs.
    pub initial_zones: u32,
    /// Amount billed per tick of occupancy.
    pub rate_per_tick: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_zones: DEFAULT_INITIAL_ZONES,
            rate_per_tick: DEFAULT_RATE_PER_TICK,
        }
    }
}

/// Why a configuration was refused.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io {
        path: String,
        source: std::io::Error,
    },
    /// The document is not valid JSON for this shape.
    Parse { reason: String },
    /// A value parsed but cannot be used.
    InvalidValue {
        field: &'static str,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read config {path}: {source}")
            }
            ConfigError::Parse { reason } => write!(f, "config does not parse: {reason}"),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "config field {field} rejected: {reason}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl SessionConfig {
    /// Reject values the engine must never see: the rate has to be a finite,
    /// non-negative number. Zero is allowed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.rate_per_tick.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "rate_per_tick",
                reason: format!("not finite: {}", self.rate_per_tick),
            });
        }
        if self.rate_per_tick < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "rate_per_tick",
                reason: format!("negative: {}", self.rate_per_tick),
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(raw).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}
